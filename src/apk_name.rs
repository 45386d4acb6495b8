//! Decoding of `<package>[_<version>].apk` download links.

/// What a download link says about the archive it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApkName {
    /// File name of the archive, `<package>[_<version>].apk`.
    pub apk_name: String,
    pub package: String,
    pub version: Option<String>,
}

/// Decodes the last path segment of `url` into archive name, package and version.
///
/// Returns `None` when the segment doesn't contain `.apk`. A trailing `_<digits>`
/// is always read as the version, so `com.foo_2.apk` decodes to package `com.foo`
/// even when `_2` is part of the package name.
pub fn decode_apk_url(url: &str) -> Option<ApkName> {
    let stem = apk_stem(url)?;
    let (package, version) = match stem.rsplit_once('_') {
        Some((package, version)) if !package.is_empty() && is_version(version) => {
            (package, Some(version.to_string()))
        }
        _ => (stem, None),
    };

    Some(ApkName {
        apk_name: format!("{stem}.apk"),
        package: package.to_string(),
        version,
    })
}

/// Archive file name carried by `url`, if any.
pub fn apk_from_url(url: &str) -> Option<String> {
    apk_stem(url).map(|stem| format!("{stem}.apk"))
}

fn apk_stem(url: &str) -> Option<&str> {
    let segment = url.rsplit('/').next()?;
    match segment.rfind(".apk") {
        Some(index) if index > 0 => Some(&segment[..index]),
        _ => None,
    }
}

#[inline]
fn is_version(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
