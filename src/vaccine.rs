//! Vaccine records mirrored from the stream, and the change they describe.

use crate::error::{Error, Result};
use crate::event::StreamRecord;
use crate::validate::{validated, FromValidate};

use serde::{de::DeserializeOwned, Deserialize, Serialize, Serializer};
use serde_dynamo::Item;
use validator::Validate;

pub const KEY_EMAIL: &str = "email";

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineRecord {
    pub email: String,
    pub image: String,
    pub last_updated: String,
    pub status: String,
    #[serde(serialize_with = "dose_or_empty")]
    pub first_dose: Option<DoseInfo>,
    #[serde(serialize_with = "dose_or_empty")]
    pub second_dose: Option<DoseInfo>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseInfo {
    pub manufacturer: String,
    pub lot_number: String,
    pub administered_by: String,
    pub administration_date: String,
}

// The Share node expects `{}` for a dose that has not been given yet.
fn dose_or_empty<S>(dose: &Option<DoseInfo>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dose {
        Some(dose) => dose.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

/// A `NewImage` as it comes off the stream, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawVaccineRecord {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required)]
    pub image: Option<String>,
    #[validate(required)]
    pub last_updated: Option<String>,
    #[validate(required)]
    pub status: Option<String>,
    #[validate]
    pub first_dose: Option<RawDoseInfo>,
    #[validate]
    pub second_dose: Option<RawDoseInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawDoseInfo {
    #[validate(required)]
    pub manufacturer: Option<String>,
    #[validate(required)]
    pub lot_number: Option<String>,
    #[validate(required)]
    pub administered_by: Option<String>,
    #[validate(required)]
    pub administration_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
struct RawRecordKey {
    #[validate(required, length(min = 1))]
    email: Option<String>,
}

fn missing(path: &str) -> Error {
    Error::invalid_event(format!("`{path}` is missing"))
}

// NULL attributes decode as `None`, so a `{"NULL": true}` dose is absent.
fn decode<T: DeserializeOwned>(item: Item, path: &str) -> Result<T> {
    serde_dynamo::from_item(item)
        .map_err(|err| Error::invalid_event(format!("`{path}` cannot be read: {err}")))
}

impl FromValidate for VaccineRecord {
    type Validatable = RawVaccineRecord;

    fn from(value: RawVaccineRecord) -> Result<VaccineRecord> {
        Ok(VaccineRecord {
            email: value.email.ok_or_else(|| missing("NewImage.email"))?,
            image: value.image.ok_or_else(|| missing("NewImage.image"))?,
            last_updated: value
                .last_updated
                .ok_or_else(|| missing("NewImage.lastUpdated"))?,
            status: value.status.ok_or_else(|| missing("NewImage.status"))?,
            first_dose: value.first_dose.map(DoseInfo::try_from).transpose()?,
            second_dose: value.second_dose.map(DoseInfo::try_from).transpose()?,
        })
    }
}

impl TryFrom<RawDoseInfo> for DoseInfo {
    type Error = Error;

    fn try_from(value: RawDoseInfo) -> Result<DoseInfo> {
        Ok(DoseInfo {
            manufacturer: value
                .manufacturer
                .ok_or_else(|| missing("manufacturer"))?,
            lot_number: value.lot_number.ok_or_else(|| missing("lotNumber"))?,
            administered_by: value
                .administered_by
                .ok_or_else(|| missing("administeredBy"))?,
            administration_date: value
                .administration_date
                .ok_or_else(|| missing("administrationDate"))?,
        })
    }
}

impl VaccineRecord {
    pub fn from_image(image: Item) -> Result<Self> {
        validated::<VaccineRecord>(decode(image, "dynamodb.NewImage")?)
    }
}

/// What a single stream record asks the relay to do.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Change {
    Insert(VaccineRecord),
    Modify(VaccineRecord),
    Remove { email: String },
    Unknown(String),
}

/// Only the section the event name needs is read, so an unknown event never
/// fails on its payload.
impl TryFrom<StreamRecord> for Change {
    type Error = Error;

    fn try_from(record: StreamRecord) -> Result<Change> {
        match record.event_name.as_str() {
            "INSERT" => Ok(Change::Insert(VaccineRecord::from_image(
                record.change.new_image,
            )?)),
            "MODIFY" => Ok(Change::Modify(VaccineRecord::from_image(
                record.change.new_image,
            )?)),
            "REMOVE" => {
                let key: RawRecordKey = decode(record.change.keys, "dynamodb.Keys")?;
                key.validate()?;
                let email = key.email.ok_or_else(|| missing("dynamodb.Keys.email"))?;
                Ok(Change::Remove { email })
            }
            _ => Ok(Change::Unknown(record.event_name)),
        }
    }
}
