//! Shared fixtures and test doubles for unit tests inside the crate.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    PasswordHash, ResidenceType, ShelterFields, Transport, User, UserProfile, Username,
};

/// Clock whose current time is set explicitly by the test.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant used as "now" across fixtures.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0)
        .single()
        .unwrap_or_else(|| panic!("fixture timestamp is unambiguous"))
}

pub fn sample_profile() -> UserProfile {
    UserProfile {
        age: 34,
        residence_type: ResidenceType::HighRiseApartment,
        transport: Transport::PublicTransport,
        has_pet: false,
        mobility_impaired: false,
        health_status: "no known conditions".to_owned(),
    }
}

/// Stored user with a placeholder hash; not usable for real verification.
pub fn sample_user(username: &str) -> User {
    User::register(
        Username::new(username).unwrap_or_else(|err| panic!("fixture username: {err}")),
        PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$fixture$fixture")
            .unwrap_or_else(|err| panic!("fixture hash: {err}")),
        sample_profile(),
    )
}

pub fn sample_shelter_fields(name: &str) -> ShelterFields {
    ShelterFields {
        name: name.to_owned(),
        address: "100 Sejong-daero, Jung-gu".to_owned(),
        latitude: 37.5663,
        longitude: 126.9779,
        capacity: 120,
        shelter_type: Some("civil defense".to_owned()),
        contact: Some("02-120".to_owned()),
    }
}
