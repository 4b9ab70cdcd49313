use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::PromptStore;

pub fn run<S: PromptStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let prompt = store.get_by_name(name)?;
    store.delete(name)?;

    Ok(CmdResult::default()
        .with_affected_prompts(vec![prompt])
        .with_message(CmdMessage::success(format!(
            "Prompt '{}' deleted successfully!",
            name
        ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn removes_prompt() {
        let mut store = StoreFixture::new().with_prompts(2).store;

        let result = run(&mut store, "prompt-1").unwrap();
        assert_eq!(result.affected_prompts[0].name, "prompt-1");
        assert!(matches!(
            store.get_by_name("prompt-1"),
            Err(PromptError::NotFound(_))
        ));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn missing_prompt_is_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(run(&mut store, "ghost"), Err(PromptError::NotFound(_))));
    }
}
