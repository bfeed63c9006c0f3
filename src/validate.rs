use crate::error::Result;

use serde::Deserialize;
use validator::Validate;

/// Types built from a raw, fully optional payload that has passed validation.
pub trait FromValidate: Sized {
    type Validatable: Validate + for<'de> Deserialize<'de>;

    fn from(value: Self::Validatable) -> Result<Self>;
}

pub fn validated<T: FromValidate>(raw: T::Validatable) -> Result<T> {
    raw.validate()?;
    FromValidate::from(raw)
}
