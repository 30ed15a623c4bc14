use serde_json::Value;
use tsunagi_core::{shape, Result, TsunagiError};
use tsunagi_graphql::query;

use super::{AppointmentLookup, AppointmentSearch, Translator};

impl Translator {
    /// Fetch one shift and shape it as an Appointment
    pub async fn get_appointment(&self, req: &AppointmentLookup) -> Result<Value> {
        let document = query::shift_query(&req.appointment_id);
        let shift = self.run(&req.tenant, &document, query::SHIFT_FIELD).await?;
        if shift.is_null() {
            return Err(TsunagiError::not_found("Appointment", &req.appointment_id));
        }
        Ok(shape::shift_to_appointment(&shift))
    }

    /// Search shifts and return a searchset Bundle of Appointments
    pub async fn search_appointments(&self, req: &AppointmentSearch) -> Result<Value> {
        let document = query::shift_search(&req.sort);
        let search = self
            .run(&req.tenant, &document, query::SHIFT_SEARCH_FIELD)
            .await?;
        let (entries, total) = shape::shift_search_entries(&search);
        Ok(shape::searchset_bundle(entries, total))
    }
}
