use serde::{Deserialize, Serialize};
use sqlx::Row;
use utoipa::ToSchema;

/// A registered rider. Serialized with exactly these five fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_num: i64,
    pub email: String,
}

/// Body for `POST /user/` and `PUT /user/:id`. Every field is required; PUT overwrites all of them.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub phone_num: i64,
    pub email: String,
}

impl User {
    pub const COLUMNS: &'static str = "id, first_name, last_name, phone_num, email";

    pub(crate) fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            phone_num: row.try_get("phone_num")?,
            email: row.try_get("email")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_fields_only() {
        let user = User {
            id: 3,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone_num: 5551234,
            email: "ada@example.com".into(),
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({
                "id": 3,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "phoneNum": 5551234,
                "email": "ada@example.com"
            })
        );
    }

    #[test]
    fn input_requires_every_field() {
        let missing_email = json!({ "firstName": "A", "lastName": "B", "phoneNum": 1 });
        assert!(serde_json::from_value::<UserInput>(missing_email).is_err());

        let ok = json!({ "firstName": "A", "lastName": "B", "phoneNum": 1, "email": "a@b.io", "id": 99 });
        let input: UserInput = serde_json::from_value(ok).unwrap();
        assert_eq!(input.phone_num, 1);
    }
}
