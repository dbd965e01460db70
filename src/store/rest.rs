//! Client for the hosted data backend, which speaks the PostgREST dialect
//! (`eq.`/`ilike.` query operators, `Prefer: return=representation` on
//! writes, RPC endpoints under `rpc/`). Filters are pushed down to the
//! backend; ordering matches the listing defaults.

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use url::Url;
use uuid::Uuid;

use super::{PortalStore, StoreError, StoreResult};
use crate::listing::{ApplicationFilter, CandidateFilter, VacancyFilter};
use crate::models::application::{Application, ApplicationSummary};
use crate::models::candidate::Candidate;
use crate::models::vacancy::Vacancy;

const APPLICATIONS: &str = "applications";
/// Denormalized read view joining candidate and vacancy fields.
const APPLICATION_SUMMARIES: &str = "application_summaries";
const VACANCIES: &str = "vacancies";
const CANDIDATES: &str = "candidates";

pub struct RestStore {
    client: reqwest::Client,
    base: Url,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str) -> StoreResult<Self> {
        let mut base = Url::parse(base_url).map_err(|e| anyhow!("invalid backend URL: {}", e))?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| anyhow!("invalid backend API key: {}", e))?;
        headers.insert("apikey", key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| anyhow!("invalid backend API key: {}", e))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| anyhow!("failed to build HTTP client: {}", e))?;

        Ok(Self { client, base })
    }

    /// Builds a store from the process configuration.
    pub fn from_config() -> StoreResult<Self> {
        let config = crate::config::get_config();
        Self::new(&config.backend_url, &config.backend_api_key)
    }

    fn endpoint(&self, table: &str) -> StoreResult<Url> {
        self.base
            .join(&format!("rest/v1/{}", table))
            .map_err(|e| StoreError::Unexpected(anyhow!("bad endpoint for {}: {}", table, e)))
    }

    fn map_status(status: StatusCode, what: &str) -> StoreError {
        match status {
            StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE => {
                StoreError::NotFound(what.to_string())
            }
            StatusCode::CONFLICT => StoreError::Conflict(what.to_string()),
            other => StoreError::Unexpected(anyhow!("backend returned {} for {}", other, what)),
        }
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(String, String)],
    ) -> StoreResult<Vec<T>> {
        let response = self
            .client
            .get(self.endpoint(table)?)
            .query(query)
            .send()
            .await
            .map_err(anyhow::Error::from)?;
        if !response.status().is_success() {
            return Err(Self::map_status(response.status(), table));
        }
        Ok(response.json().await.map_err(anyhow::Error::from)?)
    }

    async fn get_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(String, String)],
        what: &str,
    ) -> StoreResult<T> {
        let mut rows: Vec<T> = self.get_rows(table, query).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(what.to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    async fn insert<T>(&self, table: &str, body: &T) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(table)?)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(anyhow::Error::from)?;
        if !response.status().is_success() {
            return Err(Self::map_status(response.status(), table));
        }
        let mut rows: Vec<T> = response.json().await.map_err(anyhow::Error::from)?;
        if rows.is_empty() {
            return Err(StoreError::Unexpected(anyhow!(
                "backend returned no representation for insert into {}",
                table
            )));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update<T>(&self, table: &str, id: Uuid, body: &T) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let response = self
            .client
            .patch(self.endpoint(table)?)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(anyhow::Error::from)?;
        if !response.status().is_success() {
            return Err(Self::map_status(response.status(), table));
        }
        let mut rows: Vec<T> = response.json().await.map_err(anyhow::Error::from)?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(format!("{} {}", table, id)));
        }
        Ok(rows.swap_remove(0))
    }

    async fn delete_row(&self, table: &str, id: Uuid) -> StoreResult<()> {
        let response = self
            .client
            .delete(self.endpoint(table)?)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(anyhow::Error::from)?;
        if !response.status().is_success() {
            return Err(Self::map_status(
                response.status(),
                &format!("{} {}", table, id),
            ));
        }
        Ok(())
    }

    async fn rpc(&self, function: &str, body: serde_json::Value) -> StoreResult<()> {
        let url = self
            .base
            .join(&format!("rest/v1/rpc/{}", function))
            .map_err(|e| StoreError::Unexpected(anyhow!("bad rpc endpoint: {}", e)))?;
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(anyhow::Error::from)?;
        if !response.status().is_success() {
            return Err(Self::map_status(response.status(), function));
        }
        Ok(())
    }
}

fn ilike(value: &str) -> String {
    // PostgREST wildcard syntax; strip the characters that would change the
    // operator grammar.
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*'))
        .collect();
    format!("*{}*", cleaned)
}

fn application_params(filter: &ApplicationFilter) -> Vec<(String, String)> {
    let mut params = vec![("order".to_string(), "submittedAt.desc".to_string())];
    if let Some(status) = filter.status {
        params.push(("status".to_string(), format!("eq.{}", status)));
    }
    if let Some(vacancy) = filter.vacancy {
        params.push(("vacancyRef".to_string(), format!("eq.{}", vacancy)));
    }
    if let Some(experience) = &filter.experience {
        params.push(("experience".to_string(), format!("eq.{}", experience)));
    }
    if let Some(city) = &filter.city {
        params.push(("city".to_string(), format!("eq.{}", city)));
    }
    if let Some(query) = &filter.query {
        let pattern = ilike(query);
        params.push((
            "or".to_string(),
            format!(
                "(candidateName.ilike.{p},candidateEmail.ilike.{p},vacancyTitle.ilike.{p})",
                p = pattern
            ),
        ));
    }
    params
}

fn vacancy_params(filter: &VacancyFilter) -> Vec<(String, String)> {
    let mut params = vec![("order".to_string(), "publishedAt.desc".to_string())];
    if let Some(status) = filter.status {
        params.push(("status".to_string(), format!("eq.{}", status.as_str())));
    }
    if let Some(category) = &filter.category {
        params.push(("category".to_string(), format!("eq.{}", category)));
    }
    if let Some(query) = &filter.query {
        let pattern = ilike(query);
        params.push((
            "or".to_string(),
            format!("(title.ilike.{p},description.ilike.{p})", p = pattern),
        ));
    }
    params
}

fn candidate_params(filter: &CandidateFilter) -> Vec<(String, String)> {
    let mut params = vec![("order".to_string(), "createdAt.desc".to_string())];
    if let Some(status) = filter.status {
        params.push(("status".to_string(), format!("eq.{}", status.as_str())));
    }
    if let Some(experience) = &filter.experience {
        params.push(("experience".to_string(), format!("eq.{}", experience)));
    }
    if let Some(city) = &filter.city {
        params.push(("city".to_string(), format!("eq.{}", city)));
    }
    if let Some(query) = &filter.query {
        let pattern = ilike(query);
        params.push((
            "or".to_string(),
            format!(
                "(name.ilike.{p},lastName.ilike.{p},email.ilike.{p})",
                p = pattern
            ),
        ));
    }
    params
}

#[async_trait]
impl PortalStore for RestStore {
    async fn fetch_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> StoreResult<Vec<ApplicationSummary>> {
        self.get_rows(APPLICATION_SUMMARIES, &application_params(filter))
            .await
    }

    async fn fetch_application(&self, id: Uuid) -> StoreResult<Application> {
        self.get_one(
            APPLICATIONS,
            &[("id".to_string(), format!("eq.{}", id))],
            &format!("application {}", id),
        )
        .await
    }

    async fn create_application(&self, application: Application) -> StoreResult<Application> {
        self.insert(APPLICATIONS, &application).await
    }

    async fn save_application(&self, application: Application) -> StoreResult<Application> {
        self.update(APPLICATIONS, application.id, &application).await
    }

    async fn delete_application(&self, id: Uuid) -> StoreResult<()> {
        self.delete_row(APPLICATIONS, id).await
    }

    async fn fetch_vacancies(&self, filter: &VacancyFilter) -> StoreResult<Vec<Vacancy>> {
        self.get_rows(VACANCIES, &vacancy_params(filter)).await
    }

    async fn fetch_vacancy(&self, id: Uuid) -> StoreResult<Vacancy> {
        self.get_one(
            VACANCIES,
            &[("id".to_string(), format!("eq.{}", id))],
            &format!("vacancy {}", id),
        )
        .await
    }

    async fn vacancy_by_slug(&self, slug: &str) -> StoreResult<Vacancy> {
        self.get_one(
            VACANCIES,
            &[("slug".to_string(), format!("eq.{}", slug))],
            &format!("vacancy '{}'", slug),
        )
        .await
    }

    async fn create_vacancy(&self, vacancy: Vacancy) -> StoreResult<Vacancy> {
        self.insert(VACANCIES, &vacancy).await
    }

    async fn save_vacancy(&self, vacancy: Vacancy) -> StoreResult<Vacancy> {
        self.update(VACANCIES, vacancy.id, &vacancy).await
    }

    async fn delete_vacancy(&self, id: Uuid) -> StoreResult<()> {
        self.delete_row(VACANCIES, id).await
    }

    async fn record_vacancy_view(&self, id: Uuid) -> StoreResult<()> {
        self.rpc("record_vacancy_view", json!({ "vacancy_id": id }))
            .await
    }

    async fn fetch_candidates(&self, filter: &CandidateFilter) -> StoreResult<Vec<Candidate>> {
        self.get_rows(CANDIDATES, &candidate_params(filter)).await
    }

    async fn fetch_candidate(&self, id: Uuid) -> StoreResult<Candidate> {
        self.get_one(
            CANDIDATES,
            &[("id".to_string(), format!("eq.{}", id))],
            &format!("candidate {}", id),
        )
        .await
    }

    async fn candidate_by_email(&self, email: &str) -> StoreResult<Option<Candidate>> {
        let rows: Vec<Candidate> = self
            .get_rows(
                CANDIDATES,
                &[("email".to_string(), format!("eq.{}", email))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn create_candidate(&self, candidate: Candidate) -> StoreResult<Candidate> {
        self.insert(CANDIDATES, &candidate).await
    }

    async fn save_candidate(&self, candidate: Candidate) -> StoreResult<Candidate> {
        self.update(CANDIDATES, candidate.id, &candidate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus;

    #[test]
    fn filter_params_push_down_every_dimension() {
        let filter = ApplicationFilter {
            status: Some(ApplicationStatus::InReview),
            city: Some("Monterrey".to_string()),
            query: Some("lopez".to_string()),
            ..Default::default()
        };
        let params = application_params(&filter);
        assert!(params.contains(&("status".to_string(), "eq.InReview".to_string())));
        assert!(params.contains(&("city".to_string(), "eq.Monterrey".to_string())));
        assert!(params
            .iter()
            .any(|(k, v)| k == "or" && v.contains("candidateEmail.ilike.*lopez*")));
        assert_eq!(params[0], ("order".into(), "submittedAt.desc".into()));
    }

    #[test]
    fn ilike_strips_operator_grammar() {
        assert_eq!(ilike("lo,p(e)z*"), "*lopez*");
    }

    #[test]
    fn base_url_gets_a_trailing_slash() {
        let store = RestStore::new("https://backend.example.com/api", "key").unwrap();
        let url = store.endpoint("applications").unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.example.com/api/rest/v1/applications"
        );
    }
}
