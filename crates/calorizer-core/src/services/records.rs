//! Append-only client sub-records.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, error, info};

use super::keys;
use super::Clock;
use crate::db::{Database, DbResult, Entity, Predicate, Repository};
use crate::i18n::{Language, Localizer};
use crate::models::{
    BiochemicalMedicalTest, BiochemicalMedicalTestDto, Client, DrugsSupplement,
    DrugsSupplementDto, MedicalHistory, MedicalHistoryDto, WeightHistory, WeightHistoryDto,
};
use crate::response::Response;
use crate::validation::Validate;

/// A stored record owned by a client, created from a submitted form.
pub trait ClientRecord: Entity {
    /// Submitted form.
    type Dto: Validate;

    /// Message key when adding fails in the store.
    const ADD_ERROR: &'static str;
    /// Message key when deleting fails in the store.
    const DELETE_ERROR: &'static str;

    /// Build the record from a form, stamping owner and creation metadata.
    fn stamp(client_id: i64, dto: &Self::Dto, created_on: DateTime<Utc>, created_by: i64) -> Self;

    fn client_id(&self) -> i64;

    fn created_on(&self) -> DateTime<Utc>;

    /// Derived writes performed in the same transaction as the insert.
    fn after_add(&self, _conn: &Connection) -> DbResult<()> {
        Ok(())
    }
}

impl ClientRecord for WeightHistory {
    type Dto = WeightHistoryDto;
    const ADD_ERROR: &'static str = keys::ERROR_ADDING_WEIGHT_HISTORY;
    const DELETE_ERROR: &'static str = keys::ERROR_DELETING_WEIGHT_HISTORY;

    fn stamp(
        client_id: i64,
        dto: &WeightHistoryDto,
        created_on: DateTime<Utc>,
        created_by: i64,
    ) -> Self {
        Self {
            id: 0,
            client_id,
            weight: dto.weight,
            height: dto.height,
            created_on,
            created_by,
        }
    }

    fn client_id(&self) -> i64 {
        self.client_id
    }

    fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    /// Keep the client's current measurement in step with its newest entry.
    /// Only supplied values are copied.
    fn after_add(&self, conn: &Connection) -> DbResult<()> {
        let clients = Repository::<Client>::new(conn);
        if let Some(mut client) = clients.get_by_id(self.client_id)? {
            client.weight = self.weight.or(client.weight);
            client.height = self.height.or(client.height);
            clients.update(&client)?;
        }
        Ok(())
    }
}

impl ClientRecord for BiochemicalMedicalTest {
    type Dto = BiochemicalMedicalTestDto;
    const ADD_ERROR: &'static str = keys::ERROR_ADDING_BIOCHEMICAL_TEST;
    const DELETE_ERROR: &'static str = keys::ERROR_DELETING_BIOCHEMICAL_TEST;

    fn stamp(
        client_id: i64,
        dto: &BiochemicalMedicalTestDto,
        created_on: DateTime<Utc>,
        created_by: i64,
    ) -> Self {
        Self {
            id: 0,
            client_id,
            medical_data: dto.medical_data.clone(),
            created_on,
            created_by,
        }
    }

    fn client_id(&self) -> i64 {
        self.client_id
    }

    fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }
}

impl ClientRecord for DrugsSupplement {
    type Dto = DrugsSupplementDto;
    const ADD_ERROR: &'static str = keys::ERROR_ADDING_DRUGS_SUPPLEMENT;
    const DELETE_ERROR: &'static str = keys::ERROR_DELETING_DRUGS_SUPPLEMENT;

    fn stamp(
        client_id: i64,
        dto: &DrugsSupplementDto,
        created_on: DateTime<Utc>,
        created_by: i64,
    ) -> Self {
        Self {
            id: 0,
            client_id,
            drug: dto.drug.clone(),
            created_on,
            created_by,
        }
    }

    fn client_id(&self) -> i64 {
        self.client_id
    }

    fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }
}

impl ClientRecord for MedicalHistory {
    type Dto = MedicalHistoryDto;
    const ADD_ERROR: &'static str = keys::ERROR_ADDING_MEDICAL_HISTORY;
    const DELETE_ERROR: &'static str = keys::ERROR_DELETING_MEDICAL_HISTORY;

    fn stamp(
        client_id: i64,
        dto: &MedicalHistoryDto,
        created_on: DateTime<Utc>,
        created_by: i64,
    ) -> Self {
        Self {
            id: 0,
            client_id,
            medical_note: dto.medical_note.clone(),
            created_on,
            created_by,
        }
    }

    fn client_id(&self) -> i64 {
        self.client_id
    }

    fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }
}

/// Add, list and delete one family of client sub-records.
pub struct RecordService<'a, R> {
    db: &'a Database,
    localizer: &'a Localizer,
    language: Language,
    clock: &'a dyn Clock,
    _marker: PhantomData<R>,
}

impl<'a, R: ClientRecord> RecordService<'a, R> {
    pub fn new(
        db: &'a Database,
        localizer: &'a Localizer,
        language: Language,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            db,
            localizer,
            language,
            clock,
            _marker: PhantomData,
        }
    }

    /// A client's records, newest first.
    pub fn list(&self, client_id: i64) -> DbResult<Vec<R>> {
        let mut records = self.db.repository::<R>().find(&Predicate::client_id(client_id))?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Validate and insert a record for `client_id`, returning the client's
    /// refreshed list.
    pub fn add(&self, client_id: i64, dto: &R::Dto, acting_user_id: i64) -> Response<Vec<R>> {
        let violations = dto.validate_as_of(self.clock.today());
        if !violations.is_empty() {
            debug!(table = R::TABLE, client_id, ?violations, "rejected invalid record");
            return Response::validation_failure(&violations, self.localizer, self.language);
        }

        let record = R::stamp(client_id, dto, self.clock.now(), acting_user_id);
        let result = self.insert(record).and_then(|id| {
            info!(table = R::TABLE, client_id, id, "added client record");
            self.list(client_id)
        });

        match result {
            Ok(records) => Response::success(records),
            Err(e) => {
                error!(table = R::TABLE, client_id, error = %e, "failed to add client record");
                Response::failure(R::ADD_ERROR, self.localizer, self.language)
            }
        }
    }

    fn insert(&self, record: R) -> DbResult<i64> {
        let tx = self.db.transaction()?;
        let saved = Repository::<R>::new(&tx).add(record)?;
        saved.after_add(&tx)?;
        tx.commit()?;
        Ok(saved.id())
    }

    fn remove(&self, id: i64, client_id: i64) -> DbResult<bool> {
        let repo = self.db.repository::<R>();
        match repo.get_by_id(id)? {
            Some(record) if record.client_id() == client_id => {
                let deleted = repo.delete(id)?;
                info!(table = R::TABLE, client_id, id, "deleted client record");
                Ok(deleted)
            }
            _ => Ok(false),
        }
    }

    /// Delete a record of `client_id`, returning the client's refreshed list.
    ///
    /// An id that does not exist, or belongs to another client, is a no-op.
    pub fn delete(&self, id: i64, client_id: i64) -> Response<Vec<R>> {
        match self.remove(id, client_id).and_then(|_| self.list(client_id)) {
            Ok(records) => Response::success(records),
            Err(e) => {
                error!(
                    table = R::TABLE,
                    client_id,
                    id,
                    error = %e,
                    "failed to delete client record"
                );
                Response::failure(R::DELETE_ERROR, self.localizer, self.language)
            }
        }
    }
}

/// Newest `created_on` first; equal stamps fall back to newest id.
pub(crate) fn sort_newest_first<R: ClientRecord>(records: &mut [R]) {
    records.sort_by(|a, b| {
        b.created_on()
            .cmp(&a.created_on())
            .then_with(|| b.id().cmp(&a.id()))
    });
}
