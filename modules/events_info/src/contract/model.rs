use chrono::NaiveDate;

/// Registered account as seen by other modules. The password hash never
/// leaves the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Sign-up data, password still in clear text.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    /// Creator of the event; fixed at creation.
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
}

/// Data for a new event. The owner comes from the caller's identity.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
}

/// Membership of one user in one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
}

/// Authenticated caller resolved from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}
