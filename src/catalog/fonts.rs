//! Custom font families accepted by `[font=…]`.

/// Markup name to platform family name, sorted by markup name.
static FAMILIES: &[(&str, &str)] = &[
    ("arial", "Arial"),
    ("arial black", "Arial-Black"),
    ("comic sans ms", "ComicSansMS"),
    ("courier", "Courier"),
    ("courier new", "CourierNewPSMT"),
    ("georgia", "Georgia"),
    ("helvetica", "Helvetica"),
    ("impact", "Impact"),
    ("monospace", "Menlo"),
    ("palatino", "Palatino-Roman"),
    ("tahoma", "Tahoma"),
    ("times", "TimesNewRomanPSMT"),
    ("times new roman", "TimesNewRomanPSMT"),
    ("trebuchet ms", "TrebuchetMS"),
    ("verdana", "Verdana"),
];

/// Resolve a markup font name to a platform family.
pub fn lookup(name: &str) -> Option<&'static str> {
    let key = name.trim().trim_matches(['"', '\'']).to_ascii_lowercase();
    FAMILIES
        .binary_search_by(|(entry, _)| (*entry).cmp(key.as_str()))
        .ok()
        .map(|idx| FAMILIES[idx].1)
}
