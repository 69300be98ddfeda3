//! City-name normalization: map localized (Chinese) city names to the Latin
//! identifiers the OpenWeatherMap API resolves.

/// Localized name -> canonical Latin name. Static lookup data, not logic.
const CITY_NAME_MAP: &[(&str, &str)] = &[
    ("北京", "Beijing"),
    ("上海", "Shanghai"),
    ("广州", "Guangzhou"),
    ("深圳", "Shenzhen"),
    ("杭州", "Hangzhou"),
    ("南京", "Nanjing"),
    ("成都", "Chengdu"),
    ("重庆", "Chongqing"),
    ("天津", "Tianjin"),
    ("武汉", "Wuhan"),
    ("西安", "Xi'an"),
    ("苏州", "Suzhou"),
    ("长沙", "Changsha"),
    ("沈阳", "Shenyang"),
    ("青岛", "Qingdao"),
    ("郑州", "Zhengzhou"),
    ("大连", "Dalian"),
    ("宁波", "Ningbo"),
    ("厦门", "Xiamen"),
    ("福州", "Fuzhou"),
    ("济南", "Jinan"),
    ("昆明", "Kunming"),
    ("哈尔滨", "Harbin"),
    ("长春", "Changchun"),
    ("石家庄", "Shijiazhuang"),
    ("合肥", "Hefei"),
    ("太原", "Taiyuan"),
    ("南昌", "Nanchang"),
    ("贵阳", "Guiyang"),
    ("南宁", "Nanning"),
    ("兰州", "Lanzhou"),
    ("海口", "Haikou"),
    ("呼和浩特", "Hohhot"),
    ("银川", "Yinchuan"),
    ("西宁", "Xining"),
    ("拉萨", "Lhasa"),
    ("乌鲁木齐", "Urumqi"),
];

/// Normalize user input to the identifier the remote API expects.
///
/// Trims surrounding whitespace. ASCII-Latin input (letters and spaces) is
/// already in the API's expected form and passes through. Otherwise the
/// static mapping table is consulted; unrecognized names pass through
/// trimmed — the API may still resolve them, or reject them at the client
/// layer. This function never fails.
pub fn normalize_city_name(input: &str) -> &str {
    let trimmed = input.trim();

    if is_latin(trimmed) {
        return trimmed;
    }

    CITY_NAME_MAP
        .iter()
        .find(|(localized, _)| *localized == trimmed)
        .map_or(trimmed, |(_, canonical)| canonical)
}

fn is_latin(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}
