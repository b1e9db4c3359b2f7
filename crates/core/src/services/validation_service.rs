use crate::errors::CoreError;
use crate::models::entry::Entry;
use crate::models::settings::Settings;

/// Collects independent failure messages and joins them into one report.
struct MessageBuilder {
    messages: Vec<String>,
}

impl MessageBuilder {
    fn new() -> Self {
        Self { messages: Vec::new() }
    }

    fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    fn build(self) -> String {
        self.messages.join("\n")
    }
}

/// Validates raw textual input before an entry is admitted to the workspace.
///
/// Pure logic — no I/O, no state. Every failing rule contributes its own
/// message; the caller gets all of them at once rather than the first.
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate and normalize one raw entry.
    ///
    /// Rules:
    /// - group ID, if non-blank after trimming, must fit `max_id_length`
    /// - item ID must be non-blank after trimming and fit `max_id_length`
    /// - quantity must parse as an integer and be greater than zero
    ///
    /// On success returns the normalized `Entry` (blank group → no group).
    pub fn validate(
        &self,
        group_id: &str,
        item_id: &str,
        quantity: &str,
        settings: &Settings,
    ) -> Result<Entry, CoreError> {
        let max_len = settings.max_id_length;

        let group_id = group_id.trim();
        let group_id = if group_id.is_empty() { None } else { Some(group_id) };
        let item_id = item_id.trim();
        let quantity = quantity.trim().parse::<i64>().ok();

        let mut builder = MessageBuilder::new();
        if let Some(group_id) = group_id {
            if group_id.chars().count() > max_len {
                builder.add(format!(
                    "Group ID cannot be longer than {max_len} characters"
                ));
            }
        }
        if item_id.is_empty() {
            builder.add("Item ID cannot be blank");
        }
        if item_id.chars().count() > max_len {
            builder.add(format!("Item ID cannot be longer than {max_len} characters"));
        }
        match quantity {
            None => builder.add("Quantity must be a number"),
            Some(q) if q <= 0 => builder.add("Quantity must be greater than zero"),
            Some(_) => {}
        }

        if builder.has_messages() {
            return Err(CoreError::Validation(builder.build()));
        }

        // quantity is Some and positive here; the match above covered the rest
        Ok(Entry::new(
            group_id.map(str::to_owned),
            item_id,
            quantity.unwrap_or_default(),
        ))
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}
