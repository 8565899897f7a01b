use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, RegistrationField};

use super::{decode, decode_deleted, path_segment};

/// Registration fields. Writes go to the field-setup service, reads and
/// deletes to the registration-setup service.
pub struct RegistrationFieldService<'a> {
    client: &'a CidaasClient,
}

impl<'a> RegistrationFieldService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    /// Creates or updates
    pub async fn upsert(
        &self,
        field: &RegistrationField,
    ) -> ClientResult<Envelope<RegistrationField>> {
        let url = self.client.url("/fieldsetup-srv/fields");
        decode(self.client.http().post(&url, field).await?)
    }

    pub async fn get(&self, field_key: &str) -> ClientResult<Envelope<RegistrationField>> {
        let url = self.client.url(&format!(
            "/registration-setup-srv/fields/flat/field/{}",
            path_segment(field_key)
        ));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, field_key: &str) -> ClientResult<()> {
        let url = self.client.url(&format!(
            "/registration-setup-srv/fields/{}",
            path_segment(field_key)
        ));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
