use anyhow::{bail, Result};
use clap::Parser;
use trend_hunter::{
    DemandExtractor, FetchConfig, GapScorer, ReportCache, VideoSearch,
};
use tracing::info;

/// Scan subreddit feeds for trending keywords and optionally check how much
/// competing video content already exists for each of them.
#[derive(Parser, Debug)]
#[command(name = "trend-hunter", version, about)]
struct Args {
    /// Genre group as NAME=sub1,sub2,... (repeatable)
    #[arg(long = "genre", value_name = "NAME=SUBS")]
    genres: Vec<String>,

    /// How many keywords to keep per genre
    #[arg(long, default_value_t = 5)]
    cutoff: usize,

    /// Topical suffix appended to supply searches
    #[arg(long, default_value = "story")]
    qualifier: String,

    /// Score each ranked keyword against video search
    #[arg(long)]
    score: bool,

    /// Maximum search hits to request per keyword
    #[arg(long, default_value_t = 15)]
    max_results: usize,
}

fn parse_genre(spec: &str) -> Result<(String, Vec<String>)> {
    let Some((name, subs)) = spec.split_once('=') else {
        bail!("Genre must be NAME=sub1,sub2,... (got '{}')", spec);
    };
    let sources: Vec<String> = subs
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if sources.is_empty() {
        bail!("Genre '{}' lists no sources", name);
    }
    Ok((name.to_string(), sources))
}

fn default_genres() -> Vec<(String, Vec<String>)> {
    vec![
        (
            "horror".to_string(),
            vec![
                "nosleep".to_string(),
                "shortscarystories".to_string(),
                "ruleshorror".to_string(),
            ],
        ),
        (
            "drama".to_string(),
            vec![
                "relationships".to_string(),
                "confessions".to_string(),
                "dating_advice".to_string(),
            ],
        ),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let genres = if args.genres.is_empty() {
        default_genres()
    } else {
        args.genres
            .iter()
            .map(|spec| parse_genre(spec))
            .collect::<Result<Vec<_>>>()?
    };

    let extractor = DemandExtractor::new(FetchConfig::default());
    let scorer = GapScorer::new(Box::new(VideoSearch::new(FetchConfig::default())));
    let mut cache = ReportCache::default();

    for (name, sources) in &genres {
        info!("Scanning genre '{}' ({} sources)", name, sources.len());

        let report = match cache.get(sources) {
            Some(report) => report,
            None => {
                let report = extractor.extract(sources, args.cutoff).await;
                cache.insert(sources, report.clone());
                report
            }
        };

        println!("\n=== {} ===", name);
        if report.total_items == 0 {
            println!("no data (all sources failed or returned nothing)");
            continue;
        }
        println!("{} unique titles collected", report.total_items);

        for (rank, entry) in report.ranking.iter().enumerate() {
            let pct = report
                .saturation_pct(entry.count)
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| "n/a".to_string());
            println!("#{} {} ({} hits, {})", rank + 1, entry.keyword.to_uppercase(), entry.count, pct);

            for title in report.example_titles(&entry.keyword, 2) {
                println!("    - {}", title);
            }

            if args.score {
                let gap = scorer
                    .score(&entry.keyword, &args.qualifier, args.max_results)
                    .await;
                println!("    supply: {} ({} recent)", gap.verdict, gap.recent_count);
                for hit in gap.results.iter().take(2) {
                    println!("      * {} [{}] {}", hit.title, hit.recency, hit.link);
                }
            }
        }

        if !report.failures.is_empty() {
            println!("({} endpoint failures, partial data)", report.failures.len());
        }
    }

    Ok(())
}
