//! Form fields and input widgets.

/// The four inputs of the shipment form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    DriverName,
    Plate,
    Mileage,
    Rate,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::DriverName,
        FormField::Plate,
        FormField::Mileage,
        FormField::Rate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::DriverName => "Driver Name",
            Self::Plate => "License Plate Number",
            Self::Mileage => "Mileage",
            Self::Rate => "Rate per Mile",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Mileage | Self::Rate)
    }

    /// Whether `c` may be typed into this field.
    pub fn accepts(&self, c: char) -> bool {
        if self.is_numeric() {
            c.is_ascii_digit() || c == '.'
        } else {
            !c.is_control()
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{label}: '{text}' is not a number")]
    NotANumber { label: &'static str, text: String },
}

/// Numeric input with a lower bound; committed values below the floor are
/// raised to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberInput {
    value: f64,
    floor: f64,
}

impl NumberInput {
    pub fn new(value: f64, floor: f64) -> Self {
        Self {
            value: clamp_to_floor(value, floor),
            floor,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Parse and commit `text`. Leaves the value unchanged on error.
    pub fn commit(&mut self, label: &'static str, text: &str) -> Result<(), InputError> {
        let trimmed = text.trim();
        let parsed: f64 = trimmed.parse().map_err(|_| InputError::NotANumber {
            label,
            text: trimmed.to_string(),
        })?;
        if !parsed.is_finite() {
            return Err(InputError::NotANumber {
                label,
                text: trimmed.to_string(),
            });
        }
        self.value = clamp_to_floor(parsed, self.floor);
        Ok(())
    }

    /// Text shown in the widget.
    pub fn display(&self) -> String {
        format!("{:.2}", self.value)
    }
}

fn clamp_to_floor(value: f64, floor: f64) -> f64 {
    if value.is_nan() || value < floor { floor } else { value }
}

/// Current values of the shipment form.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentForm {
    pub driver_name: String,
    pub plate: String,
    pub mileage: NumberInput,
    pub rate: NumberInput,
}

impl ShipmentForm {
    /// Empty form: mileage starts at the floor and the rate at `base_rate`.
    pub fn new(base_rate: f64, floor: f64) -> Self {
        Self {
            driver_name: String::new(),
            plate: String::new(),
            mileage: NumberInput::new(floor, floor),
            rate: NumberInput::new(base_rate, floor),
        }
    }

    pub fn set(&mut self, field: FormField, text: &str) -> Result<(), InputError> {
        match field {
            FormField::DriverName => self.driver_name = text.to_string(),
            FormField::Plate => self.plate = text.to_string(),
            FormField::Mileage => self.mileage.commit(field.label(), text)?,
            FormField::Rate => self.rate.commit(field.label(), text)?,
        }
        Ok(())
    }

    /// Display value of a field.
    pub fn display(&self, field: FormField) -> String {
        match field {
            FormField::DriverName => self.driver_name.clone(),
            FormField::Plate => self.plate.clone(),
            FormField::Mileage => self.mileage.display(),
            FormField::Rate => self.rate.display(),
        }
    }

    /// Raw value used to seed the edit buffer.
    pub fn edit_seed(&self, field: FormField) -> String {
        match field {
            FormField::DriverName => self.driver_name.clone(),
            FormField::Plate => self.plate.clone(),
            FormField::Mileage => self.mileage.value().to_string(),
            FormField::Rate => self.rate.value().to_string(),
        }
    }
}
