use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, Template, TemplateQuery};

use super::{decode, decode_deleted, path_segment};

/// Custom notification templates
pub struct TemplateService<'a> {
    client: &'a CidaasClient,
}

impl<'a> TemplateService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    /// Creates or updates
    pub async fn upsert(&self, template: &Template) -> ClientResult<Envelope<Template>> {
        let url = self.client.url("/templates-srv/template/custom");
        decode(self.client.http().post(&url, template).await?)
    }

    /// Lookup by key, type and locale (a POST carrying the query)
    pub async fn find(&self, query: &TemplateQuery) -> ClientResult<Envelope<Template>> {
        let url = self.client.url("/templates-srv/template/custom/find");
        decode(self.client.http().post(&url, query).await?)
    }

    /// Key and type are uppercased in the path
    pub async fn delete(&self, template_key: &str, template_type: &str) -> ClientResult<()> {
        let url = self.client.url(&format!(
            "/templates-srv/template/custom/{}/{}",
            path_segment(&template_key.to_uppercase()),
            path_segment(&template_type.to_uppercase())
        ));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
