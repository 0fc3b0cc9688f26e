use anyhow::Result;
use tbdeploy_core::{scan_commits, CommitSource, DeployEngine, TrackerApi};

pub async fn scan<G: CommitSource>(commits: &G, tag: Option<&str>, dedupe: bool) -> Result<()> {
    let scan = scan_commits(commits, tag, dedupe).await?;

    println!("Previous tag: {}", scan.tag);
    println!();

    println!("Task references: {}", scan.log.task_ids.len());
    for id in &scan.log.task_ids {
        println!("  tb #{}", id);
    }
    println!();

    println!("Untasked commits: {}", scan.log.untasked.len());
    for subject in &scan.log.untasked {
        println!("  {}", subject);
    }

    Ok(())
}

pub async fn preview<G, A>(engine: &DeployEngine<G, A>) -> Result<()>
where
    G: CommitSource,
    A: TrackerApi,
{
    let announcement = engine.prepare().await?;

    println!("{}", announcement.name);
    println!("{}", "=".repeat(announcement.name.len()));
    println!();
    print!("{}", announcement.body);

    Ok(())
}

pub async fn announce<G, A>(engine: &DeployEngine<G, A>) -> Result<()>
where
    G: CommitSource,
    A: TrackerApi,
{
    let announcement = engine.announce().await?;

    println!("✓ Posted \"{}\"", announcement.name);
    println!("  Project: {}", announcement.project_id);
    println!("  Git tag: {}", announcement.tag);
    println!("  Tasks: {}", announcement.task_count);

    if announcement.failed_count > 0 {
        println!(
            "  ⚠ {} task(s) could not be fetched and are listed as failures",
            announcement.failed_count
        );
    }

    Ok(())
}
