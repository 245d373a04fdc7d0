//! Shared test payloads, shaped like real API responses.

/// Name search for "London": three candidates, the second with every
/// optional reading absent.
pub(crate) const SEARCH_LONDON: &str = r#"{
    "cod": "200",
    "count": 3,
    "list": [
        {
            "id": 2643743,
            "name": "London",
            "dt": 1370000000,
            "sys": {"country": "GB"},
            "main": {"temp": 289.76, "temp_min": 288.71, "temp_max": 290.93,
                     "pressure": 1011, "humidity": 63},
            "weather": [{"id": 802, "main": "Clouds",
                         "description": "scattered clouds", "icon": "03d"}],
            "wind": {"speed": 4.1},
            "clouds": {"all": 32}
        },
        {
            "id": 6058560,
            "name": "London",
            "dt": 1370000100,
            "sys": {"country": "CA"},
            "main": {"temp": 294.16, "temp_min": 293.15, "temp_max": 295.37},
            "weather": [{"id": 800, "main": "Clear",
                         "description": "Sky is Clear", "icon": "01d"}]
        },
        {
            "id": 3456068,
            "name": "Londrina",
            "dt": 1370000200,
            "sys": {"country": "BR"},
            "main": {"temp": 291.52, "temp_min": 291.52, "temp_max": 291.52,
                     "pressure": 1020, "humidity": 77},
            "weather": [{"id": 500, "main": "Rain",
                         "description": "light rain", "icon": "10d"}],
            "wind": {"speed": 2.6},
            "clouds": {"all": 75}
        }
    ]
}"#;

/// Seven-day daily forecast for the London (GB) place id, dates ascending.
pub(crate) const DAILY_LONDON: &str = r#"{
    "cod": "200",
    "city": {"id": 2643743, "name": "London"},
    "cnt": 7,
    "list": [
        {"dt": 1370001600, "temp": {"day": 290.4, "night": 283.1},
         "pressure": 1012, "humidity": 70, "speed": 3.9, "clouds": 24,
         "weather": [{"id": 801, "icon": "02d"}]},
        {"dt": 1370088000, "temp": {"day": 291.9, "night": 284.0},
         "pressure": 1014, "humidity": 66, "speed": 4.4, "clouds": 8,
         "weather": [{"id": 800, "icon": "01d"}]},
        {"dt": 1370174400, "temp": {"day": 289.2, "night": 282.5},
         "pressure": 1010, "humidity": 81, "speed": 5.2, "clouds": 88,
         "weather": [{"id": 500, "icon": "10d"}]},
        {"dt": 1370260800, "temp": {"day": 287.0, "night": 281.7},
         "pressure": 1008, "humidity": 85, "speed": 6.0, "clouds": 92,
         "weather": [{"id": 501, "icon": "10d"}]},
        {"dt": 1370347200, "temp": {"day": 288.4, "night": 282.2},
         "pressure": 1011, "humidity": 74, "speed": 4.8, "clouds": 40,
         "weather": [{"id": 802, "icon": "03d"}]},
        {"dt": 1370433600, "temp": {"day": 290.8, "night": 283.9},
         "pressure": 1013, "humidity": 64, "speed": 3.2, "clouds": 12,
         "weather": [{"id": 801, "icon": "02d"}]},
        {"dt": 1370520000, "temp": {"day": 292.1, "night": 285.0},
         "pressure": 1015, "humidity": 58, "speed": 2.9, "clouds": 0,
         "weather": [{"id": 800, "icon": "01d"}]}
    ]
}"#;
