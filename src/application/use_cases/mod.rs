mod analyze_contract;
mod answer_question;
pub mod prompts;

pub use analyze_contract::*;
pub use answer_question::*;
pub use prompts::*;
