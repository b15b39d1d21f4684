// `Transport` implementation for the GraphQL client.
//
// Each method picks a document, binds variables, and narrows the `data`
// payload to the sub-tree the entity layer consumes.

use secrecy::SecretString;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::Error;
use crate::graphql::client::{GraphqlClient, take_path};
use crate::graphql::queries::{
    DEVICE_FRAGMENTS, FRAGMENT_ACTIVITY_SUMMARY, FRAGMENT_BASE_DETAILS, FRAGMENT_ONGOING_ACTIVITY,
    FRAGMENT_PET_PROFILE, FRAGMENT_PLACE, FRAGMENT_POSITION, FRAGMENT_REST_SUMMARY,
    FRAGMENT_USER_DETAILS, MUTATION_DEVICE_OPS, MUTATION_SET_LED_COLOR, QUERY_CURRENT_USER,
    QUERY_DEVICE_DETAILS, QUERY_HOUSEHOLDS, QUERY_PET_LOCATION, QUERY_PET_REST_STATS,
    QUERY_PET_STATS, document,
};
use crate::transport::{LoginSession, Transport};

/// Collar operating mode sent by the lost-mode mutation.
pub const MODE_NORMAL: &str = "NORMAL";
pub const MODE_LOST: &str = "LOST";

fn pet_vars(pet_id: &str) -> Value {
    json!({ "petId": pet_id })
}

impl Transport for GraphqlClient {
    fn login(&self, email: &str, password: &SecretString) -> Result<LoginSession, Error> {
        GraphqlClient::login(self, email, password)
    }

    fn fetch_households(&self) -> Result<Vec<Value>, Error> {
        let mut fragments = vec![FRAGMENT_PET_PROFILE, FRAGMENT_BASE_DETAILS];
        fragments.extend_from_slice(DEVICE_FRAGMENTS);
        let data = self.query(&document(QUERY_HOUSEHOLDS, &fragments), None)?;

        match take_path(data, &["currentUser", "userHouseholds"])? {
            Value::Array(households) => {
                debug!("fetched {} household(s)", households.len());
                Ok(households)
            }
            other => Err(Error::Deserialization {
                message: "userHouseholds is not a list".into(),
                body: other.to_string(),
            }),
        }
    }

    fn fetch_user_detail(&self) -> Result<Value, Error> {
        let data = self.query(&document(QUERY_CURRENT_USER, &[FRAGMENT_USER_DETAILS]), None)?;
        take_path(data, &["currentUser"])
    }

    fn fetch_pet_location(&self, pet_id: &str) -> Result<Value, Error> {
        let doc = document(
            QUERY_PET_LOCATION,
            &[FRAGMENT_ONGOING_ACTIVITY, FRAGMENT_POSITION, FRAGMENT_PLACE],
        );
        let data = self.query(&doc, Some(&pet_vars(pet_id)))?;
        take_path(data, &["pet", "ongoingActivity"])
    }

    fn fetch_pet_stats(&self, pet_id: &str) -> Result<Value, Error> {
        let doc = document(QUERY_PET_STATS, &[FRAGMENT_ACTIVITY_SUMMARY]);
        let data = self.query(&doc, Some(&pet_vars(pet_id)))?;
        take_path(data, &["pet"])
    }

    fn fetch_pet_rest_stats(&self, pet_id: &str) -> Result<Value, Error> {
        let doc = document(QUERY_PET_REST_STATS, &[FRAGMENT_REST_SUMMARY]);
        let data = self.query(&doc, Some(&pet_vars(pet_id)))?;
        take_path(data, &["pet"])
    }

    fn fetch_device_details(&self, pet_id: &str) -> Result<Value, Error> {
        let doc = document(QUERY_DEVICE_DETAILS, DEVICE_FRAGMENTS);
        let data = self.query(&doc, Some(&pet_vars(pet_id)))?;
        take_path(data, &["pet"])
    }

    fn send_led_color_mutation(&self, module_id: &str, color_code: i64) -> Result<Value, Error> {
        debug!("setting LED colour {} on module {}", color_code, module_id);
        self.mutate(
            &document(MUTATION_SET_LED_COLOR, DEVICE_FRAGMENTS),
            &json!({ "moduleId": module_id, "ledColorCode": color_code }),
        )
    }

    fn send_led_toggle_mutation(&self, module_id: &str, enabled: bool) -> Result<Value, Error> {
        debug!("setting LED enabled={} on module {}", enabled, module_id);
        self.mutate(
            &document(MUTATION_DEVICE_OPS, DEVICE_FRAGMENTS),
            &json!({ "input": { "moduleId": module_id, "ledEnabled": enabled } }),
        )
    }

    fn send_lost_mode_mutation(&self, module_id: &str, enable: bool) -> Result<Value, Error> {
        let mode = if enable { MODE_LOST } else { MODE_NORMAL };
        debug!("setting mode {} on module {}", mode, module_id);
        self.mutate(
            &document(MUTATION_DEVICE_OPS, DEVICE_FRAGMENTS),
            &json!({ "input": { "moduleId": module_id, "mode": mode } }),
        )
    }
}
