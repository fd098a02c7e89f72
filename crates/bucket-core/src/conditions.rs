use crate::actions::LINE_BREAK;
use crate::types::Condition;

pub const NO_CONDITIONS: &str = "No conditions";

const PENDING_BANK_ANSWERS: &str = " (Pending Bank Answers)";

/// Tooltip text for a bucket's condition list, one `- field op value` line
/// per condition.
pub fn format_for_tooltip(conditions: Option<&[Condition]>) -> String {
    let conditions = match conditions {
        Some(c) if !c.is_empty() => c,
        _ => return NO_CONDITIONS.to_string(),
    };

    conditions
        .iter()
        .map(|c| {
            let mut line = format!(
                "- {} {} {}",
                c.field.as_deref().unwrap_or_default(),
                c.operator.as_deref().unwrap_or_default(),
                c.value_text()
            );
            if is_pending_bank_answers(c) {
                line.push_str(PENDING_BANK_ANSWERS);
            }
            line
        })
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

// The upstream encodes "no answer yet" as the string "null".
fn is_pending_bank_answers(c: &Condition) -> bool {
    c.field.as_deref() == Some("AllBanksAnsweredAt")
        && c.operator.as_deref() == Some("==")
        && c.value_is_null_string()
}
