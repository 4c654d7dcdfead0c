/// Leaving the onboarding surface.
pub trait Navigator {
    /// Ask the user a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Discard the draft project at `delete_url`, then go to `target`.
    fn discard_and_redirect(&mut self, delete_url: &str, target: &str);

    fn redirect(&mut self, target: &str);
}
