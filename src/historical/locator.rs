//! Finds the archive file of a station in the HTML directory listing of the DWD
//! server. The server publishes no machine-readable index, so this matches on
//! markup and is deliberately strict about what counts as a hit.

const HREF_MARKER: &str = "href";
const HREF_OPEN: &str = "href=\"";

/// The suffix every daily "recent" archive of `station_id` ends with.
pub fn archive_suffix(station_id: &str) -> String {
    format!("_{}_akt.zip", station_id)
}

/// Returns the archive file name for `station_id`, or `None` if the listing has
/// no matching link.
///
/// A line qualifies only if it carries both the station suffix and a link, and
/// the quoted link target itself contains the suffix. Any directory part of the
/// target is stripped.
///
/// ```
/// use dwd_climate::find_archive_filename;
///
/// let listing = r#"<a href="/data/tageswerte_KL_02667_akt.zip">tageswerte_KL_02667_akt.zip</a>"#;
/// assert_eq!(
///     find_archive_filename(listing, "02667").as_deref(),
///     Some("tageswerte_KL_02667_akt.zip")
/// );
/// assert_eq!(find_archive_filename(listing, "03623"), None);
/// ```
pub fn find_archive_filename(listing: &str, station_id: &str) -> Option<String> {
    let suffix = archive_suffix(station_id);

    listing
        .lines()
        .filter(|line| line.contains(&suffix) && line.contains(HREF_MARKER))
        .filter_map(href_target)
        .find(|target| target.contains(&suffix))
        .map(|target| file_name(target).to_string())
}

fn href_target(line: &str) -> Option<&str> {
    let start = line.find(HREF_OPEN)? + HREF_OPEN.len();
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

fn file_name(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}
