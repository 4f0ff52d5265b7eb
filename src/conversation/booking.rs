use crate::models::AppointmentDraft;

/// Draft field filled in by one booking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    OwnerName,
    PetName,
    PhoneNumber,
    PreferredDateTime,
}

impl BookingField {
    /// Wire name of the field in the appointment payload.
    pub fn key(&self) -> &'static str {
        match self {
            BookingField::OwnerName => "ownerName",
            BookingField::PetName => "petName",
            BookingField::PhoneNumber => "phoneNumber",
            BookingField::PreferredDateTime => "preferredDateTime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingStep {
    pub field: BookingField,
    pub question: &'static str,
}

/// The booking questions, always asked in this order.
pub const BOOKING_STEPS: [BookingStep; 4] = [
    BookingStep { field: BookingField::OwnerName, question: "What's your name?" },
    BookingStep { field: BookingField::PetName, question: "What's your pet's name?" },
    BookingStep { field: BookingField::PhoneNumber, question: "Your phone number?" },
    BookingStep {
        field: BookingField::PreferredDateTime,
        question: "Preferred appointment date & time?",
    },
];

pub const BOOKING_CONFIRMED: &str = "✅ Your appointment is booked!";
pub const BOOKING_FAILED: &str = "❌ Failed to book appointment. Please try again.";

impl AppointmentDraft {
    /// Empty draft with the pet name pre-filled from the session, if known.
    pub fn seeded(pet_name: Option<String>) -> Self {
        Self {
            pet_name: pet_name.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: BookingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BookingField::OwnerName => self.owner_name = value,
            BookingField::PetName => self.pet_name = value,
            BookingField::PhoneNumber => self.phone_number = value,
            BookingField::PreferredDateTime => self.preferred_date_time = value,
        }
    }

    pub fn get(&self, field: BookingField) -> &str {
        match field {
            BookingField::OwnerName => &self.owner_name,
            BookingField::PetName => &self.pet_name,
            BookingField::PhoneNumber => &self.phone_number,
            BookingField::PreferredDateTime => &self.preferred_date_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_cover_every_field_once_in_order() {
        let keys: Vec<_> = BOOKING_STEPS.iter().map(|s| s.field.key()).collect();
        assert_eq!(keys, ["ownerName", "petName", "phoneNumber", "preferredDateTime"]);
    }

    #[test]
    fn field_keys_match_the_serialized_draft() {
        let mut draft = AppointmentDraft::default();
        for (i, step) in BOOKING_STEPS.iter().enumerate() {
            draft.set(step.field, format!("v{i}"));
        }
        let value = serde_json::to_value(&draft).unwrap();
        for (i, step) in BOOKING_STEPS.iter().enumerate() {
            assert_eq!(value[step.field.key()], format!("v{i}"));
            assert_eq!(draft.get(step.field), format!("v{i}"));
        }
    }

    #[test]
    fn seeded_draft_only_prefills_pet_name() {
        let draft = AppointmentDraft::seeded(Some("Rex".into()));
        assert_eq!(draft.pet_name, "Rex");
        assert!(draft.owner_name.is_empty());
        assert_eq!(AppointmentDraft::seeded(None), AppointmentDraft::default());
    }
}
