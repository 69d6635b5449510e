use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub id: String,
    pub name: String,
    pub identity_number: String,
}

impl Passenger {
    pub fn new(id: String, name: String, identity_number: String) -> Self {
        Passenger {
            id,
            name,
            identity_number,
        }
    }
}
