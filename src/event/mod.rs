//! Inbound Lambda payloads.

pub mod s3;

pub use aws_lambda_events::event::dynamodb::{Event as StreamEvent, EventRecord as StreamRecord};
pub use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
pub use s3::{object_refs, ObjectRef};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{S3Event, StreamEvent};

    pub fn s3_record(bucket: &str, key: &str, region: &str) -> serde_json::Value {
        serde_json::json!({
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": region,
            "eventTime": "2021-01-01T00:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "userIdentity": { "principalId": "AWS:EXAMPLE" },
            "requestParameters": { "sourceIPAddress": "127.0.0.1" },
            "responseElements": {
                "x-amz-request-id": "C3D13FE58DE4C810",
                "x-amz-id-2": "FMyUVURIY8/IgAtTv8xRjskZQpcIZ9KG4V5Wp6S7S/JRWeUWerMUE5JgHvANOjpD"
            },
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "share-relay",
                "bucket": {
                    "name": bucket,
                    "ownerIdentity": { "principalId": "EXAMPLE" },
                    "arn": format!("arn:aws:s3:::{bucket}")
                },
                "object": {
                    "key": key,
                    "size": 1024,
                    "eTag": "d41d8cd98f00b204e9800998ecf8427e",
                    "sequencer": "0055AED6DCD90281E5"
                }
            }
        })
    }

    pub fn s3_event(records: Vec<serde_json::Value>) -> S3Event {
        serde_json::from_value(serde_json::json!({ "Records": records })).unwrap()
    }

    /// A stream record with the given `Keys` / `NewImage`; `null` leaves one out.
    pub fn stream_record(
        id: &str,
        event_name: &str,
        keys: serde_json::Value,
        new_image: serde_json::Value,
    ) -> serde_json::Value {
        let mut change = serde_json::json!({
            "ApproximateCreationDateTime": 1609459200,
            "SequenceNumber": format!("{id}00000000000000000001"),
            "SizeBytes": 128,
            "StreamViewType": "NEW_AND_OLD_IMAGES"
        });
        if !keys.is_null() {
            change["Keys"] = keys;
        }
        if !new_image.is_null() {
            change["NewImage"] = new_image;
        }

        serde_json::json!({
            "eventID": id,
            "eventName": event_name,
            "eventVersion": "1.1",
            "eventSource": "aws:dynamodb",
            "awsRegion": "us-east-1",
            "eventSourceARN": "arn:aws:dynamodb:us-east-1:123456789012:table/VaccineRecords/stream/2021-01-01T00:00:00.000",
            "dynamodb": change
        })
    }

    pub fn stream_event(records: Vec<serde_json::Value>) -> StreamEvent {
        serde_json::from_value(serde_json::json!({ "Records": records })).unwrap()
    }

    pub fn email_key(email: &str) -> serde_json::Value {
        serde_json::json!({ "email": { "S": email } })
    }

    pub fn dose() -> serde_json::Value {
        serde_json::json!({
            "M": {
                "manufacturer": { "S": "Pfizer" },
                "lotNumber": { "S": "L1" },
                "administeredBy": { "S": "ClinicA" },
                "administrationDate": { "S": "2021-01-01" }
            }
        })
    }

    pub fn image(email: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "email": { "S": email },
            "image": { "S": "img1" },
            "status": { "S": status },
            "lastUpdated": { "S": "2021-01-01" },
            "firstDose": dose()
        })
    }
}
