use anyhow::{
  Context,
  anyhow,
  bail
};
use gloo::net::http::{
  Request,
  Response
};
use serde::de::DeserializeOwned;
use taskboard_core::{
  Endpoints,
  NewTask,
  Task,
  TaskApi,
  TaskId
};

/// `TaskApi` over the browser fetch
/// API. An empty base talks to the
/// page's own origin.
#[derive(Debug, Clone)]
pub struct FetchApi {
  endpoints: Endpoints
}

impl FetchApi {
  pub fn same_origin() -> Self {
    Self {
      endpoints: Endpoints::new("")
    }
  }
}

impl TaskApi for FetchApi {
  async fn list(
    &self
  ) -> anyhow::Result<Vec<Task>> {
    let url = self.endpoints.collection();
    let response = Request::get(&url)
      .header("Accept", "application/json")
      .send()
      .await
      .map_err(|e| {
        anyhow!("GET {url} failed: {e}")
      })?;
    decode(&url, response).await
  }

  async fn create(
    &self,
    draft: &NewTask
  ) -> anyhow::Result<Task> {
    let url = self.endpoints.collection();
    let request = Request::post(&url)
      .json(draft)
      .map_err(|e| {
        anyhow!(
          "failed to encode task: {e}"
        )
      })?;
    let response =
      request.send().await.map_err(|e| {
        anyhow!("POST {url} failed: {e}")
      })?;
    decode(&url, response).await
  }

  async fn update(
    &self,
    task: &Task
  ) -> anyhow::Result<Task> {
    let url = self.endpoints.item(task.id);
    let request = Request::put(&url)
      .json(task)
      .map_err(|e| {
        anyhow!(
          "failed to encode task: {e}"
        )
      })?;
    let response =
      request.send().await.map_err(|e| {
        anyhow!("PUT {url} failed: {e}")
      })?;
    decode(&url, response).await
  }

  async fn delete(
    &self,
    id: TaskId
  ) -> anyhow::Result<()> {
    let url = self.endpoints.item(id);
    let response = Request::delete(&url)
      .send()
      .await
      .map_err(|e| {
        anyhow!("DELETE {url} failed: {e}")
      })?;
    ensure_ok(&url, &response)
  }
}

fn ensure_ok(
  url: &str,
  response: &Response
) -> anyhow::Result<()> {
  if !response.ok() {
    bail!(
      "{url} returned HTTP {} {}",
      response.status(),
      response.status_text()
    );
  }
  Ok(())
}

async fn decode<T>(
  url: &str,
  response: Response
) -> anyhow::Result<T>
where
  T: DeserializeOwned
{
  ensure_ok(url, &response)?;
  let body =
    response.text().await.map_err(|e| {
      anyhow!(
        "failed reading body from \
         {url}: {e}"
      )
    })?;
  serde_json::from_str(&body)
    .with_context(|| {
      format!(
        "failed decoding response \
         from {url}"
      )
    })
}
