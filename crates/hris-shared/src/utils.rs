//! Utility functions

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = if local.chars().count() <= 2 { 1 } else { 2 };
        let visible: String = local.chars().take(keep).collect();
        format!("{}***{}", visible, domain)
    } else {
        "***".to_string()
    }
}

/// Trim and lowercase an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
