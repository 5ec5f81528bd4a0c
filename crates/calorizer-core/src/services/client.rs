//! Client service.

use tracing::{debug, error, info};

use super::keys;
use super::{ClientRecord, Clock, LookupService, RecordService, SystemClock};
use crate::db::{Database, DbError, DbResult, Repository};
use crate::i18n::{Language, Localizer};
use crate::models::{
    BiochemicalMedicalTest, BiochemicalMedicalTestDto, Client, ClientDetails, ClientDto,
    DrugsSupplement, DrugsSupplementDto, LookupType, MedicalHistory, MedicalHistoryDto,
    WeightHistory, WeightHistoryDto,
};
use crate::response::Response;
use crate::validation::Validate;

/// Client lifecycle plus access to the client's sub-records.
pub struct ClientService<'a> {
    db: &'a Database,
    localizer: &'a Localizer,
    language: Language,
    clock: &'a dyn Clock,
}

impl<'a> ClientService<'a> {
    pub fn new(db: &'a Database, localizer: &'a Localizer, language: Language) -> Self {
        Self {
            db,
            localizer,
            language,
            clock: &SystemClock,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Service for one sub-record family, sharing this service's context.
    pub fn records<R: ClientRecord>(&self) -> RecordService<'a, R> {
        RecordService::new(self.db, self.localizer, self.language, self.clock)
    }

    fn failure<T>(&self, key: &str) -> Response<T> {
        Response::failure(key, self.localizer, self.language)
    }

    // ==================== Clients ====================

    /// Validate and insert a client. When a weight or height is supplied the
    /// first weight history entry is written in the same transaction.
    pub fn create_client(&self, dto: &ClientDto, acting_user_id: i64) -> Response<ClientDto> {
        let violations = dto.validate_as_of(self.clock.today());
        if !violations.is_empty() {
            debug!(?violations, "rejected invalid client");
            return Response::validation_failure(&violations, self.localizer, self.language);
        }

        match self.insert_client(dto, acting_user_id) {
            Ok(client) => {
                info!(client_id = client.id, "created client");
                Response::success(client.into())
            }
            Err(e) => {
                error!(error = %e, "failed to create client");
                self.failure(keys::ERROR_CREATING_CLIENT)
            }
        }
    }

    fn insert_client(&self, dto: &ClientDto, acting_user_id: i64) -> DbResult<Client> {
        let client = Client::from_dto(dto)
            .ok_or_else(|| DbError::Constraint("client has no date of birth".into()))?;

        let tx = self.db.transaction()?;
        let client = Repository::<Client>::new(&tx).add(client)?;
        if dto.weight.is_some() || dto.height.is_some() {
            let entry = WeightHistory::stamp(
                client.id,
                &WeightHistoryDto {
                    client_id: client.id,
                    weight: dto.weight,
                    height: dto.height,
                },
                self.clock.now(),
                acting_user_id,
            );
            Repository::<WeightHistory>::new(&tx).add(entry)?;
        }
        tx.commit()?;
        Ok(client)
    }

    /// Validate and overwrite a client. A changed weight or height appends a
    /// weight history entry in the same transaction.
    pub fn update_client(&self, dto: &ClientDto, acting_user_id: i64) -> Response<ClientDto> {
        let violations = dto.validate_as_of(self.clock.today());
        if !violations.is_empty() {
            debug!(client_id = dto.id, ?violations, "rejected invalid client update");
            return Response::validation_failure(&violations, self.localizer, self.language);
        }

        match self.overwrite_client(dto, acting_user_id) {
            Ok(client) => {
                info!(client_id = client.id, "updated client");
                Response::success(client.into())
            }
            Err(DbError::NotFound(_)) => {
                debug!(client_id = dto.id, "update of unknown client");
                self.failure(keys::CLIENT_NOT_FOUND)
            }
            Err(e) => {
                error!(client_id = dto.id, error = %e, "failed to update client");
                self.failure(keys::ERROR_UPDATING_CLIENT)
            }
        }
    }

    fn overwrite_client(&self, dto: &ClientDto, acting_user_id: i64) -> DbResult<Client> {
        let tx = self.db.transaction()?;
        let clients = Repository::<Client>::new(&tx);

        let mut client = clients
            .get_by_id(dto.id)?
            .ok_or_else(|| DbError::NotFound(format!("client {}", dto.id)))?;
        let measurement_changed = client.measurement_differs(dto);
        client
            .apply(dto)
            .ok_or_else(|| DbError::Constraint("client has no date of birth".into()))?;
        clients.update(&client)?;

        if measurement_changed {
            let entry = WeightHistory::stamp(
                client.id,
                &WeightHistoryDto {
                    client_id: client.id,
                    weight: dto.weight,
                    height: dto.height,
                },
                self.clock.now(),
                acting_user_id,
            );
            Repository::<WeightHistory>::new(&tx).add(entry)?;
        }

        tx.commit()?;
        Ok(client)
    }

    /// Delete a client and return the remaining clients.
    ///
    /// Clients that still own sub-records cannot be deleted.
    pub fn delete_client(&self, id: i64) -> Response<Vec<ClientDto>> {
        let clients = self.db.repository::<Client>();
        let result = clients.exists(id).and_then(|exists| {
            if !exists {
                return Err(DbError::NotFound(format!("client {}", id)));
            }
            clients.delete(id)?;
            self.all_clients()
        });

        match result {
            Ok(remaining) => {
                info!(client_id = id, "deleted client");
                Response::success(remaining)
            }
            Err(DbError::NotFound(_)) => self.failure(keys::CLIENT_NOT_FOUND),
            Err(e) => {
                error!(client_id = id, error = %e, "failed to delete client");
                self.failure(keys::ERROR_DELETING_CLIENT)
            }
        }
    }

    pub fn client_by_id(&self, id: i64) -> DbResult<Option<ClientDto>> {
        Ok(self.db.repository::<Client>().get_by_id(id)?.map(Into::into))
    }

    pub fn all_clients(&self) -> DbResult<Vec<ClientDto>> {
        let clients = self.db.repository::<Client>().get_all()?;
        Ok(clients.into_iter().map(Into::into).collect())
    }

    /// Everything the client edit view shows.
    pub fn client_details(&self, id: i64) -> DbResult<Option<ClientDetails>> {
        let Some(client) = self.client_by_id(id)? else {
            return Ok(None);
        };

        Ok(Some(ClientDetails {
            client,
            genders: LookupService::new(self.db).lookup_items(LookupType::Gender)?,
            weight_histories: self.weight_histories(id)?,
            biochemical_tests: self.biochemical_tests(id)?,
            drugs_supplements: self.drugs_supplements(id)?,
            medical_histories: self.medical_histories(id)?,
        }))
    }

    // ==================== Weight history ====================

    pub fn add_weight_history(
        &self,
        client_id: i64,
        dto: &WeightHistoryDto,
        acting_user_id: i64,
    ) -> Response<Vec<WeightHistory>> {
        self.records::<WeightHistory>().add(client_id, dto, acting_user_id)
    }

    pub fn weight_histories(&self, client_id: i64) -> DbResult<Vec<WeightHistory>> {
        self.records::<WeightHistory>().list(client_id)
    }

    pub fn delete_weight_history(&self, id: i64, client_id: i64) -> Response<Vec<WeightHistory>> {
        self.records::<WeightHistory>().delete(id, client_id)
    }

    // ==================== Biochemical tests ====================

    pub fn add_biochemical_test(
        &self,
        client_id: i64,
        dto: &BiochemicalMedicalTestDto,
        acting_user_id: i64,
    ) -> Response<Vec<BiochemicalMedicalTest>> {
        self.records::<BiochemicalMedicalTest>().add(client_id, dto, acting_user_id)
    }

    pub fn biochemical_tests(&self, client_id: i64) -> DbResult<Vec<BiochemicalMedicalTest>> {
        self.records::<BiochemicalMedicalTest>().list(client_id)
    }

    pub fn delete_biochemical_test(
        &self,
        id: i64,
        client_id: i64,
    ) -> Response<Vec<BiochemicalMedicalTest>> {
        self.records::<BiochemicalMedicalTest>().delete(id, client_id)
    }

    // ==================== Drugs and supplements ====================

    pub fn add_drugs_supplement(
        &self,
        client_id: i64,
        dto: &DrugsSupplementDto,
        acting_user_id: i64,
    ) -> Response<Vec<DrugsSupplement>> {
        self.records::<DrugsSupplement>().add(client_id, dto, acting_user_id)
    }

    pub fn drugs_supplements(&self, client_id: i64) -> DbResult<Vec<DrugsSupplement>> {
        self.records::<DrugsSupplement>().list(client_id)
    }

    pub fn delete_drugs_supplement(
        &self,
        id: i64,
        client_id: i64,
    ) -> Response<Vec<DrugsSupplement>> {
        self.records::<DrugsSupplement>().delete(id, client_id)
    }

    // ==================== Medical history ====================

    pub fn add_medical_history(
        &self,
        client_id: i64,
        dto: &MedicalHistoryDto,
        acting_user_id: i64,
    ) -> Response<Vec<MedicalHistory>> {
        self.records::<MedicalHistory>().add(client_id, dto, acting_user_id)
    }

    pub fn medical_histories(&self, client_id: i64) -> DbResult<Vec<MedicalHistory>> {
        self.records::<MedicalHistory>().list(client_id)
    }

    pub fn delete_medical_history(&self, id: i64, client_id: i64) -> Response<Vec<MedicalHistory>> {
        self.records::<MedicalHistory>().delete(id, client_id)
    }
}
