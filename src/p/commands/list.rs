use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::PromptStore;
use crate::tags::TagFilter;

pub const EMPTY_MESSAGE: &str = "No prompts found.";

/// Lists prompts by name, optionally narrowed by a tag filter.
///
/// An empty filter lists everything. "Nothing matched the filter" and
/// "nothing stored" get different messages.
pub fn run<S: PromptStore>(store: &S, filter: Option<&TagFilter>) -> Result<CmdResult> {
    let filter = filter.filter(|f| !f.is_empty());
    let prompts = match filter {
        Some(filter) => store.list_filtered(filter)?,
        None => store.list()?,
    };

    let mut result = CmdResult::default();
    if prompts.is_empty() {
        let message = match filter {
            Some(filter) => format!("No prompts found for tags: {}", filter),
            None => EMPTY_MESSAGE.to_string(),
        };
        result.add_message(CmdMessage::info(message));
    }
    Ok(result.with_listed_prompts(prompts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn tagged_store() -> InMemoryStore {
        StoreFixture::new()
            .with_prompt("ab", "1", "a,b")
            .with_prompt("abc", "2", "a,b,c")
            .with_prompt("plain", "3", "")
            .store
    }

    fn names(result: &CmdResult) -> Vec<&str> {
        result.listed_prompts.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn lists_everything_without_filter() {
        let result = run(&tagged_store(), None).unwrap();
        assert_eq!(names(&result), vec!["ab", "abc", "plain"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn any_and_all_filters() {
        let store = tagged_store();

        let result = run(&store, Some(&TagFilter::parse("b,c"))).unwrap();
        assert_eq!(names(&result), vec!["ab", "abc"]);

        let result = run(&store, Some(&TagFilter::parse("AND:b,c"))).unwrap();
        assert_eq!(names(&result), vec!["abc"]);

        let result = run(&store, Some(&TagFilter::all("a,c"))).unwrap();
        assert_eq!(names(&result), vec!["abc"]);
    }

    #[test]
    fn blank_filter_lists_everything() {
        let result = run(&tagged_store(), Some(&TagFilter::parse(" , "))).unwrap();
        assert_eq!(result.listed_prompts.len(), 3);
    }

    #[test]
    fn empty_results_are_reported_distinctly() {
        let empty = run(&InMemoryStore::new(), None).unwrap();
        assert_eq!(empty.messages[0].content, EMPTY_MESSAGE);

        let unmatched = run(&tagged_store(), Some(&TagFilter::parse("zzz"))).unwrap();
        assert!(unmatched.listed_prompts.is_empty());
        assert_eq!(unmatched.messages[0].content, "No prompts found for tags: zzz");
    }
}
