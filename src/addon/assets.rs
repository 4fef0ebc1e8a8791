//! Channel art URLs.

// helper.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// Strip the broadcast quality suffix and whitespace: `WABC-HD` -> `WABC`,
/// `PBS Kids DT2` -> `PBSKids`.
pub fn clean_name(guide_name: &str) -> String {
    let trimmed = regex!(r"(?i)[-\s]?(DT|HD|LD)\d*$").replace(guide_name, "");
    regex!(r"\s+").replace_all(&trimmed, "").into_owned()
}

/// Logo URL served by this addon for a channel.
pub fn asset_url(external_base: &str, guide_name: &str) -> String {
    format!(
        "{}/assets/{}.png",
        external_base,
        urlencoding::encode(&clean_name(guide_name))
    )
}

/// Name encoded in an `/assets/{file}` request, if any.
pub fn name_from_file(file: &str) -> Option<String> {
    let raw = file.strip_suffix(".png").unwrap_or(file);
    let name = urlencoding::decode(raw).ok()?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Avatar image for a cleaned channel name.
pub fn avatar_url(avatar_base: &str, name: &str) -> String {
    format!(
        "{}?name={}&background=random&color=fff&size=512&font-size=0.5&bold=true",
        avatar_base,
        urlencoding::encode(name)
    )
}
