//! The fixed table of weather condition codes.
//!
//! The API reports sky and precipitation state as an integer code grouped by
//! meteorological category (2xx thunderstorm, 3xx drizzle, 5xx rain, 6xx
//! snow, 7xx atmosphere, 800–804 clear/clouds, 9xx extreme). A code outside
//! this table makes the payload unparseable; callers must not drop it
//! silently.

/// Resolve a condition code to its human-readable phrase.
pub fn describe(code: u16) -> Option<&'static str> {
    Some(match code {
        200 => "thunderstorm with light rain",
        201 => "thunderstorm with rain",
        202 => "thunderstorm with heavy rain",
        210 => "light thunderstorm",
        211 => "thunderstorm",
        212 => "heavy thunderstorm",
        221 => "ragged thunderstorm",
        230 => "thunderstorm with light drizzle",
        231 => "thunderstorm with drizzle",
        232 => "thunderstorm with heavy drizzle",
        300 => "light intensity drizzle",
        301 => "drizzle",
        302 => "heavy intensity drizzle",
        310 => "light intensity drizzle rain",
        311 => "drizzle rain",
        312 => "heavy intensity drizzle rain",
        321 => "shower drizzle",
        500 => "light rain",
        501 => "moderate rain",
        502 => "heavy intensity rain",
        503 => "very heavy rain",
        504 => "extreme rain",
        511 => "freezing rain",
        520 => "light intensity shower rain",
        521 => "shower rain",
        522 => "heavy intensity shower rain",
        600 => "light snow",
        601 => "snow",
        602 => "heavy snow",
        611 => "sleet",
        621 => "shower snow",
        701 => "mist",
        711 => "smoke",
        721 => "haze",
        731 => "sand/dust whirls",
        741 => "fog",
        761 => "dust",
        800 => "sky is clear",
        801 => "few clouds",
        802 => "scattered clouds",
        803 => "broken clouds",
        804 => "overcast clouds",
        900 => "tornado",
        901 => "tropical storm",
        902 => "hurricane",
        903 => "cold",
        904 => "hot",
        905 => "windy",
        906 => "hail",
        _ => return None,
    })
}
