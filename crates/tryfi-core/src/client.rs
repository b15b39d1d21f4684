// ── Session orchestrator ──
//
// Owns the logged-in user, the tracked pets and the charging bases, and
// drives the polling refresh cycle over a `Transport`. Refreshes are
// all-or-nothing per collection: a failure is reported and the previous
// collection stays in place.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use tryfi_api::{GraphqlClient, LoginSession, Transport};

use crate::config::{ClientConfig, Credentials};
use crate::convert::{as_array, as_text, field};
use crate::error::CoreError;
use crate::model::stats::Window;
use crate::model::{Base, Pet, User};
use crate::report::{FaultReporter, TracingReporter};

/// Device value the backend sends for a pet without a collar.
pub const NO_DEVICE: &str = "None";

/// The main entry point for consumers.
///
/// Single-threaded: every method blocks on the transport and mutates the
/// tracked collections in place.
pub struct Client<T: Transport = GraphqlClient> {
    transport: T,
    reporter: Arc<dyn FaultReporter>,
    session: Option<LoginSession>,
    user: Option<User>,
    pets: Vec<Pet>,
    bases: Vec<Base>,
}

impl Client<GraphqlClient> {
    /// Log in, load the user profile, and perform a full refresh.
    pub fn connect(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = GraphqlClient::new(&config.transport())?;
        let mut client = Self::new(transport);
        client.login(&config.credentials)?;
        client.refresh_user();
        client.refresh_all();
        Ok(client)
    }
}

impl<T: Transport> Client<T> {
    /// Wrap a transport, reporting absorbed faults through `tracing`.
    pub fn new(transport: T) -> Self {
        Self::with_reporter(transport, Arc::new(TracingReporter))
    }

    pub fn with_reporter(transport: T, reporter: Arc<dyn FaultReporter>) -> Self {
        Self {
            transport,
            reporter,
            session: None,
            user: None,
            pets: Vec::new(),
            bases: Vec::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> Option<&LoginSession> {
        self.session.as_ref()
    }

    /// The logged-in user; `None` before `login`.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Authenticate. A backend error envelope becomes
    /// `CoreError::LoginFailed`; HTTP failures pass through as `Api`.
    pub fn login(&mut self, credentials: &Credentials) -> Result<(), CoreError> {
        let session = self
            .transport
            .login(&credentials.email, &credentials.password)
            .map_err(|err| match err {
                tryfi_api::Error::Login { message } => CoreError::LoginFailed { message },
                other => CoreError::Api(other),
            })?;

        info!(user = %session.user_id, "logged in");
        self.user = Some(User::new(session.user_id.clone()));
        self.session = Some(session);
        Ok(())
    }

    /// Fetch the user profile. Failures are reported.
    pub fn refresh_user(&mut self) {
        if let Some(user) = self.user.as_mut() {
            user.fetch_and_apply(&self.transport, self.reporter.as_ref());
        } else {
            self.reporter.report(&CoreError::NotLoaded {
                field: "user (login first)".into(),
            });
        }
    }

    // ── Refresh cycle ────────────────────────────────────────────────

    /// Relist pets and fully populate each one.
    pub fn refresh_pets(&mut self) {
        match self.load_pets() {
            Ok(pets) => {
                info!(count = pets.len(), "pets refreshed");
                self.pets = pets;
            }
            Err(err) => {
                warn!("pet refresh failed, keeping {} tracked pet(s)", self.pets.len());
                self.reporter.report(&err);
            }
        }
    }

    /// Relist charging bases.
    pub fn refresh_bases(&mut self) {
        match self.load_bases() {
            Ok(bases) => {
                info!(count = bases.len(), "bases refreshed");
                self.bases = bases;
            }
            Err(err) => {
                warn!("base refresh failed, keeping {} base(s)", self.bases.len());
                self.reporter.report(&err);
            }
        }
    }

    /// Bases first, then pets. Each step absorbs its own failures, so a
    /// failed base refresh does not prevent the pet refresh.
    pub fn refresh_all(&mut self) {
        self.refresh_bases();
        self.refresh_pets();
    }

    /// Run every per-pet update on each tracked pet without relisting.
    pub fn update_all_pet_details(&mut self) {
        let reporter = self.reporter.as_ref();
        for pet in &mut self.pets {
            pet.update_all_details(&self.transport, reporter);
        }
    }

    /// Swap in `pet` for the tracked pet with the same id, keeping its
    /// position. An untracked id leaves the collection unchanged.
    pub fn refresh_one_tracked_pet(&mut self, pet: Pet) {
        match self.pets.iter().position(|p| p.id() == pet.id()) {
            Some(idx) => self.pets[idx] = pet,
            None => debug!(pet = %pet.id(), "not tracked, nothing to replace"),
        }
    }

    // ── Lookup ───────────────────────────────────────────────────────

    pub fn find_pet_by_id(&self, pet_id: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id() == pet_id)
    }

    pub fn find_base_by_id(&self, base_id: &str) -> Option<&Base> {
        self.bases.iter().find(|b| b.id() == base_id)
    }

    // ── Control by pet id ────────────────────────────────────────────

    /// `false` when the pet is not tracked or the mutation fails.
    pub fn set_pet_led_color(&mut self, pet_id: &str, code: i64) -> bool {
        let reporter = self.reporter.as_ref();
        self.pets
            .iter_mut()
            .find(|p| p.id() == pet_id)
            .is_some_and(|pet| pet.set_led_color_code(&self.transport, code, reporter))
    }

    pub fn turn_pet_led(&mut self, pet_id: &str, on: bool) -> bool {
        let reporter = self.reporter.as_ref();
        self.pets
            .iter_mut()
            .find(|p| p.id() == pet_id)
            .is_some_and(|pet| pet.turn_on_off_led(&self.transport, on, reporter))
    }

    pub fn set_pet_lost_mode(&mut self, pet_id: &str, enable: bool) -> bool {
        let reporter = self.reporter.as_ref();
        self.pets
            .iter_mut()
            .find(|p| p.id() == pet_id)
            .is_some_and(|pet| pet.set_lost_dog_mode(&self.transport, enable, reporter))
    }

    // ── Loading ──────────────────────────────────────────────────────

    fn load_pets(&self) -> Result<Vec<Pet>, CoreError> {
        let reporter = self.reporter.as_ref();
        let households = self.transport.fetch_households()?;
        let mut pets: Vec<Pet> = Vec::new();

        for household in &households {
            let entries = as_array(field(field(household, "household")?, "pets")?, "pets")?;
            for raw in entries {
                if has_no_device(raw) {
                    let name = raw.get("name").and_then(Value::as_str).unwrap_or("<unnamed>");
                    warn!(pet = name, "pet has no collar, not tracking it");
                    continue;
                }

                let mut pet = Pet::from_details(raw, reporter)?;
                let location = self.transport.fetch_pet_location(pet.id())?;
                pet.set_current_location(&location, reporter)?;

                let stats = self.transport.fetch_pet_stats(pet.id())?;
                pet.set_stats(
                    field(&stats, Window::Daily.payload_key())?,
                    field(&stats, Window::Weekly.payload_key())?,
                    field(&stats, Window::Monthly.payload_key())?,
                )?;

                let rest = self.transport.fetch_pet_rest_stats(pet.id())?;
                pet.set_rest_stats(
                    field(&rest, Window::Daily.payload_key())?,
                    field(&rest, Window::Weekly.payload_key())?,
                    field(&rest, Window::Monthly.payload_key())?,
                    reporter,
                )?;

                debug!(pet = %pet.id(), name = %pet.name, "pet loaded");
                upsert(&mut pets, pet, Pet::id);
            }
        }
        Ok(pets)
    }

    fn load_bases(&self) -> Result<Vec<Base>, CoreError> {
        let reporter = self.reporter.as_ref();
        let households = self.transport.fetch_households()?;
        let mut bases: Vec<Base> = Vec::new();

        for household in &households {
            let entries = as_array(field(field(household, "household")?, "bases")?, "bases")?;
            for raw in entries {
                let mut base = Base::new(as_text(field(raw, "baseId")?, "baseId")?);
                base.apply_details(raw, reporter);
                upsert(&mut bases, base, Base::id);
            }
        }
        Ok(bases)
    }
}

fn has_no_device(raw: &Value) -> bool {
    match raw.get("device") {
        Some(Value::Null) => true,
        Some(Value::String(s)) => s == NO_DEVICE,
        _ => false,
    }
}

/// Replace the entry with the same id, or append.
fn upsert<E>(items: &mut Vec<E>, item: E, id: impl Fn(&E) -> &str) {
    match items.iter().position(|e| id(e) == id(&item)) {
        Some(idx) => items[idx] = item,
        None => items.push(item),
    }
}
