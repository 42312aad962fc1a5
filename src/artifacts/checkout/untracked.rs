use crate::artifacts::objects::commit::Manifest;

/// First working file that is not tracked by `tracked` but would be written or deleted by an
/// operation touching `touched`.
///
/// Such a file holds contents that exist nowhere in the store, so the operation must refuse to
/// run instead of clobbering it.
pub fn find_untracked_in_the_way<'a>(
    working_files: &[String],
    tracked: &Manifest,
    touched: impl IntoIterator<Item = &'a String>,
) -> Option<String> {
    touched
        .into_iter()
        .find(|name| !tracked.contains_key(*name) && working_files.contains(*name))
        .cloned()
}
