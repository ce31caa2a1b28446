pub const SYSTEM_PROMPT: &str = "You are a cybersecurity analyst. You review aggregated \
vulnerability scan statistics and write concise, actionable findings for an IT security team.";

/// User prompt asking for an analysis of the statistics block.
pub fn build_prompt(summary: &str) -> String {
    format!(
        "As a cybersecurity analyst, analyze the following data summary:\n\n\
         {}\n\n\
         Identify:\n\
         1. Key risks and concerns\n\
         2. Patterns in vulnerability distribution\n\
         3. Any major security trends\n\
         4. Recommendations to mitigate the risks\n",
        summary.trim_end()
    )
}
