/// Turn a raw description into a file stem.
///
/// Spaces become underscores, everything from the first period on is
/// dropped, then every single and double quote is removed. Path separators
/// become underscores so the stem always names a file in its own directory.
/// The result may be empty.
pub fn sanitize(raw: &str) -> String {
    let underscored = raw.replace(' ', "_");

    let before_period = match underscored.find('.') {
        Some(index) => &underscored[..index],
        None => underscored.as_str(),
    };

    before_period
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .map(|c| if std::path::is_separator(c) { '_' } else { c })
        .collect()
}
