use anyhow::Result;

/// Source of answers for the interactive setup. The terminal implementation
/// is [`super::InquireDriver`]; tests script the answers instead.
pub trait PromptDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;
    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64>;

    /// Picks one of `options`. The default implementation asks for free text
    /// until the answer is one of them.
    fn ask_choice(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        default: &str,
    ) -> Result<String> {
        let help = format!("{help}\none of: {}", options.join(", "));
        loop {
            let answer = self.ask_string(title, &help, default)?;
            let answer = answer.trim();
            if options.iter().any(|o| o == answer) {
                return Ok(answer.to_string());
            }
            eprintln!("✗ '{answer}' is not one of {}", options.join(", "));
        }
    }
}
