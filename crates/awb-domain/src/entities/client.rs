//! Client rows

use super::record::entity_record;
use crate::value_objects::EntityType;

entity_record! {
    /// Entity: Client
    ///
    /// A requester of work. `RequestedTaskIDs` references the task
    /// collection; `AttributesJSON` carries free-form JSON metadata.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use awb_domain::entities::{Client, EntityRecord};
    ///
    /// let client: Client = serde_json::from_str(
    ///     r#"{"ClientID": "C1", "PriorityLevel": 3, "RequestedTaskIDs": "T1,T2"}"#,
    /// ).unwrap();
    /// assert_eq!(client.id().as_deref(), Some("C1"));
    /// assert_eq!(client.columns(), vec!["ClientID", "PriorityLevel", "RequestedTaskIDs"]);
    /// ```
    Client => EntityType::Clients,
    id = "ClientID",
    required = ["ClientID", "ClientName", "PriorityLevel", "RequestedTaskIDs", "GroupTag"],
    {
        /// Unique, non-empty identifier
        client_id => "ClientID",
        /// Display name
        client_name => "ClientName",
        /// Priority level, 1 to 5
        priority_level => "PriorityLevel",
        /// Requested task identifiers (comma list or array)
        requested_task_ids => "RequestedTaskIDs",
        /// Group tag used by slot-restriction rules
        group_tag => "GroupTag",
        /// Serialized JSON attributes
        attributes_json => "AttributesJSON",
    }
}
