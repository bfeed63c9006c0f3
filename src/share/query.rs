use crate::vaccine::VaccineRecord;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Root {
    Query,
    Mutation,
}

/// A GraphQL document with the root field its data is read from.
#[derive(Debug)]
pub struct Operation {
    pub name: &'static str,
    pub root: Root,
    pub field: &'static str,
    pub document: &'static str,
}

pub const INTROSPECT: Operation = Operation {
    name: "IntrospectRootFields",
    root: Root::Query,
    field: "__schema",
    document: r#"
        query IntrospectRootFields {
            __schema {
                queryType { fields { name } }
                mutationType { fields { name } }
            }
        }
    "#,
};

pub const WRITE_ATTACHMENT: Operation = Operation {
    name: "writeAttachment",
    root: Root::Mutation,
    field: "add_File_async",
    document: r#"
        mutation writeAttachment(
            $sourceBucket: String!,
            $sourceKey: String!,
            $sourceRegion: String!,
            $destinationKey: String!
        ) {
            add_File_async(
                input: {
                    SourceBucket: $sourceBucket,
                    SourceKey: $sourceKey,
                    SourceRegion: $sourceRegion,
                    DestinationKey: $destinationKey
                }
            ) {
                error
                result {
                    id
                    node_owner
                    submission_time
                    tx_id
                }
            }
        }
    "#,
};

pub const ADD_RECORD: Operation = Operation {
    name: "addRecord",
    root: Root::Mutation,
    field: "addVaccineRecord_async",
    document: r#"
        mutation addRecord(
            $email: String!,
            $image: String,
            $lastUpdated: String,
            $status: String,
            $firstDose: firstDoseInput,
            $secondDose: secondDoseInput
        ) {
            addVaccineRecord_async(
                input: {
                    email: $email,
                    image: $image,
                    lastUpdated: $lastUpdated,
                    status: $status,
                    firstDose: $firstDose,
                    secondDose: $secondDose
                }
            ) {
                error
                result {
                    id
                    node_owner
                    submission_time
                    tx_id
                }
            }
        }
    "#,
};

pub const LIST_VACCINE_RECORD: Operation = Operation {
    name: "listVaccineRecord",
    root: Root::Query,
    field: "listVaccineRecords",
    document: r#"
        query listVaccineRecord($email: String!) {
            listVaccineRecords(filter: { email: { eq: $email } }) {
                VaccineRecords {
                    id
                }
            }
        }
    "#,
};

pub const UPDATE_VACCINE_RECORD: Operation = Operation {
    name: "updateVaccineRecord",
    root: Root::Mutation,
    field: "putVaccineRecord_async",
    document: r#"
        mutation updateVaccineRecord(
            $id: ID!,
            $email: String!,
            $image: String,
            $lastUpdated: String,
            $status: String,
            $firstDose: firstDoseInput,
            $secondDose: secondDoseInput
        ) {
            putVaccineRecord_async(
                id: $id,
                input: {
                    email: $email,
                    image: $image,
                    lastUpdated: $lastUpdated,
                    status: $status,
                    firstDose: $firstDose,
                    secondDose: $secondDose
                }
            ) {
                error
                result {
                    id
                }
            }
        }
    "#,
};

pub const REMOVE_RECORD: Operation = Operation {
    name: "removeRecord",
    root: Root::Mutation,
    field: "removeVaccineRecord_async",
    document: r#"
        mutation removeRecord($id: ID!) {
            removeVaccineRecord_async(id: $id) {
                error
                result {
                    id
                }
            }
        }
    "#,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request<'a, V: Serialize> {
    pub query: &'a str,
    pub operation_name: &'a str,
    pub variables: &'a V,
}

#[derive(Debug, Serialize)]
pub struct RecordVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(flatten)]
    pub record: &'a VaccineRecord,
}

#[derive(Debug, Serialize)]
pub struct EmailVariables<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct IdVariables<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Default, Deserialize)]
pub struct VaccineRecordList {
    #[serde(rename = "VaccineRecords", default)]
    pub vaccine_records: Option<Vec<RecordId>>,
}

#[derive(Debug, Deserialize)]
pub struct RecordId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}
