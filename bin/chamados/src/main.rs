//! Entrypoint.

use std::{io::Write, time::Duration};

use clap::Parser;
use config::{ApiOpts, Command, Opts};
use dotenvy::dotenv;
use eyre::Context;
use incident::{
    Client, IncidentApi, IncidentFilter, IncidentPatch, NewIncident, Priority, RecordId,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        // Try the default .env file, and ignore if it doesn't exist.
        dotenv().ok();
    }

    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = build_client(&opts.api)?;
    info!(base_url = %client.base_url(), "Using chamados backend");

    let mut stdout = std::io::stdout().lock();
    run(&client, opts.command, &mut stdout).await
}

/// Build the HTTP client, applying the optional request timeout.
fn build_client(api: &ApiOpts) -> eyre::Result<Client> {
    let mut http = reqwest::Client::builder();
    if let Some(secs) = api.timeout_secs {
        http = http.timeout(Duration::from_secs(secs));
    }
    let http = http.build().wrap_err("building HTTP client")?;
    Ok(Client::with_http_client(api.api_base_url.clone(), http)?)
}

/// Execute one command and write its result to `out` as pretty JSON.
async fn run(api: &dyn IncidentApi, command: Command, out: &mut impl Write) -> eyre::Result<()> {
    debug!(?command, "Running command");
    match command {
        Command::List => print_json(out, &api.list().await?),
        Command::Get { id } => print_json(out, &api.get_by_id(RecordId::from(id)).await?),
        Command::Create { title, description, department, priority, user_id } => {
            let new = NewIncident {
                title,
                description,
                department,
                priority: Priority::from_label(&priority),
                user_id,
            };
            print_json(out, &api.create(&new).await?)
        }
        Command::Update { id, title, description, status, priority, code } => {
            let patch = IncidentPatch {
                title,
                description,
                status,
                priority,
                code,
                ..Default::default()
            };
            print_json(out, &api.update(RecordId::from(id), &patch).await?)
        }
        Command::Delete { id } => {
            let id = RecordId::from(id);
            let deleted = api.delete(id.clone()).await?;
            info!(%id, "Deleted incident");
            print_json(out, &deleted)
        }
        Command::Search { query } => print_json(out, &api.search(&query).await?),
        Command::Filter { status, priority, department } => {
            let filter = IncidentFilter {
                status,
                priority: priority.as_deref().map(Priority::from_label),
                department,
            };
            print_json(out, &api.filter(&filter).await?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> eyre::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::{Matcher, Server};

    async fn run_to_string(server: &Server, command: Command) -> eyre::Result<String> {
        let api = ApiOpts { api_base_url: server.url().parse().unwrap(), timeout_secs: Some(5) };
        let client = build_client(&api)?;
        let mut out = Vec::new();
        run(&client, command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn create_maps_priority_label() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chamados")
            .match_body(Matcher::PartialJsonString(r#"{"prioridade":"CRITICA"}"#.to_owned()))
            .with_status(201)
            .with_body(r#"{"id":4,"titulo":"Servidor fora"}"#)
            .create_async()
            .await;

        let out = run_to_string(
            &server,
            Command::Create {
                title: "Servidor fora".to_owned(),
                description: "Sem resposta".to_owned(),
                department: "TI".to_owned(),
                priority: "critical".to_owned(),
                user_id: 1,
            },
        )
        .await
        .unwrap();

        let printed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(printed["titulo"], "Servidor fora");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn filter_with_unknown_priority_sends_lowest_tier() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/chamados/filtrar")
            .match_query(Matcher::Exact("prioridade=BAIXA".to_owned()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let out = run_to_string(
            &server,
            Command::Filter { status: None, priority: Some("urgent".to_owned()), department: None },
        )
        .await
        .unwrap();

        assert_eq!(out.trim(), "[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_prints_true() {
        let mut server = Server::new_async().await;
        let _mock = server.mock("DELETE", "/chamados/8").with_status(204).create_async().await;

        let out = run_to_string(&server, Command::Delete { id: "8".to_owned() }).await.unwrap();
        assert_eq!(out.trim(), "true");
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let mut server = Server::new_async().await;
        let _mock = server.mock("GET", "/chamados").with_status(500).create_async().await;

        let err = run_to_string(&server, Command::List).await.unwrap_err();
        assert_eq!(err.to_string(), "Erro ao carregar os chamados");
    }
}
