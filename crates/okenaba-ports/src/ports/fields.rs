use okenaba_core::{FieldKey, FieldValues};

/// Live form inputs: a current text value plus an error slot per field.
pub trait FieldSource: FieldValues {
    fn set_field_value(&mut self, key: FieldKey, value: &str);

    fn set_field_error(&mut self, key: FieldKey, message: &str);

    fn clear_field_error(&mut self, key: FieldKey);

    fn clear_all_field_errors(&mut self);

    fn focus_field(&mut self, key: FieldKey);
}
