pub mod prompts;
pub mod render;

pub use prompts::{
    collect_order_request, parse_number, prompt_credentials, prompt_number, prompt_with_presets,
    prompt_yes_no,
};
pub use render::{display_flow_outcome, display_recommendation, format_recommendation};
