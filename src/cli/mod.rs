use anyhow::Result;

use crate::config::Settings;
use crate::models::MatchupAnalysis;
use crate::services::{league_url, list_teams, DatasetLoader, MatchupAnalyzer, LEAGUES};

pub async fn analyze_matchup(
    settings: Settings,
    source: &str,
    team1: &str,
    team2: &str,
    json: bool,
) -> Result<()> {
    let loader = DatasetLoader::new(settings)?;
    let analyzer = MatchupAnalyzer::new();

    let analysis = analyzer
        .analyze_from_source(&loader, source, team1, team2)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_matchup(&analysis));
    }

    Ok(())
}

pub async fn show_teams(settings: Settings, source: &str) -> Result<()> {
    let loader = DatasetLoader::new(settings)?;
    let dataset = loader.load(source).await?;
    let teams = list_teams(&dataset.matches);

    println!("📋 {} teams in {}:\n", teams.len(), dataset.source);
    for team in teams {
        println!("   • {}", team);
    }

    Ok(())
}

pub fn show_leagues(settings: &Settings) {
    println!("🏆 Available Leagues (season {}):\n", settings.season);

    for league in LEAGUES {
        println!("   • {} [{}] {}", league.name, league.code, league_url(settings, league));
    }

    println!("\n💡 Use 'momentum teams --source \"<league>\"' to list a league's teams");
    println!("💡 Use 'momentum analyze --source \"<league>\" --team1 <A> --team2 <B>' to compare two teams");
}

/// Render a matchup as a heading, the confidence line and a one-row-per-team table.
pub fn render_matchup(analysis: &MatchupAnalysis) -> String {
    let teams = [&analysis.team1, &analysis.team2];
    let recent_columns = teams.iter().map(|t| t.recent.len()).max().unwrap_or(0);

    let mut header = vec!["Team".to_string()];
    header.extend((1..=recent_columns).map(|i| format!("Recent {}", i)));
    header.push("Momentum".to_string());

    let mut rows = vec![header];
    for team in teams {
        let mut row = vec![team.team.clone()];
        for i in 0..recent_columns {
            let cell = team
                .recent
                .get(i)
                .map(|e| format!("{} ({} {})", e.outcome, e.scoreline, e.opponent))
                .unwrap_or_default();
            row.push(cell);
        }
        row.push(team.display.clone());
        rows.push(row);
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("### {} vs {}\n", analysis.team1.team, analysis.team2.team));
    out.push_str(&format!(
        "Bet Confidence: {} (Difference: {})\n\n",
        analysis.confidence.label, analysis.confidence.difference
    ));

    for (i, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }

    out
}
