use anyhow::bail;
use scraper_admin_engine::{download_s3_object, AdminApi, S3Filter};

use super::print_next_page;
use crate::cli::S3Command;
use crate::config::AppConfig;
use crate::render;

pub async fn run(config: &AppConfig, command: S3Command) -> anyhow::Result<()> {
    let client = config.client()?;
    match command {
        S3Command::List {
            entity,
            tournament_id,
            page,
        } => {
            let filter = S3Filter {
                entity_id: entity,
                tournament_id,
            };
            let page = client.list_s3_objects(&filter, &page.into()).await?;
            print!("{}", render::s3_table(&page.items));
            print_next_page(page.next_token.as_deref());
        }
        S3Command::View { key } => {
            let content = client.get_s3_content(&key).await?;
            print!("{}", content.html);
        }
        S3Command::Download { key, dir } => {
            let dir = dir.unwrap_or_else(|| config.download_dir.clone());
            let saved = download_s3_object(&client, &key, &dir).await?;
            let check = match saved.hash_matches {
                Some(true) => "hash ok",
                Some(false) => "HASH MISMATCH",
                None => "no recorded hash",
            };
            println!(
                "saved {} ({} bytes, sha256 {}, {})",
                saved.path.display(),
                saved.byte_len,
                saved.sha256,
                check
            );
        }
        S3Command::Delete { key, yes } => {
            if !yes {
                bail!("refusing to delete {key} without --yes");
            }
            let result = client.delete_s3_object(&key).await?;
            report_action("deleted", &key, result.success, result.message)?;
        }
        S3Command::Reparse { key } => {
            let result = client.reparse_s3_object(&key).await?;
            report_action("re-parse queued for", &key, result.success, result.message)?;
        }
    }
    Ok(())
}

fn report_action(
    verb: &str,
    key: &str,
    success: bool,
    message: Option<String>,
) -> anyhow::Result<()> {
    if !success {
        bail!(
            "{key}: {}",
            message.unwrap_or_else(|| "rejected by backend".to_string())
        );
    }
    println!("{verb} {key}");
    Ok(())
}
