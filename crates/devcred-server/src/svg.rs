//! Reputation badge artwork

use github_client::RepoStats;

use crate::reputation::Reputation;

/// Render the 400x400 SVG card shown as a reputation NFT's image
pub fn render_badge(repo: &RepoStats, reputation: &Reputation) -> String {
    let accent = reputation.tier.accent();
    let language = repo.language.as_deref().unwrap_or("Unknown");

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 400 400">
  <rect width="400" height="400" rx="24" fill="#0d1117"/>
  <rect x="12" y="12" width="376" height="376" rx="18" fill="none" stroke="{accent}" stroke-width="4"/>
  <text x="200" y="70" font-family="monospace" font-size="18" fill="#8b949e" text-anchor="middle">DevCred Reputation</text>
  <text x="200" y="120" font-family="monospace" font-size="22" font-weight="bold" fill="#f0f6fc" text-anchor="middle">{name}</text>
  <text x="200" y="185" font-family="monospace" font-size="40" font-weight="bold" fill="{accent}" text-anchor="middle">{tier}</text>
  <text x="200" y="225" font-family="monospace" font-size="18" fill="#f0f6fc" text-anchor="middle">Score {score}</text>
  <text x="60" y="300" font-family="monospace" font-size="16" fill="#8b949e">Stars</text>
  <text x="340" y="300" font-family="monospace" font-size="16" fill="#f0f6fc" text-anchor="end">{stars}</text>
  <text x="60" y="330" font-family="monospace" font-size="16" fill="#8b949e">Forks</text>
  <text x="340" y="330" font-family="monospace" font-size="16" fill="#f0f6fc" text-anchor="end">{forks}</text>
  <text x="60" y="360" font-family="monospace" font-size="16" fill="#8b949e">Language</text>
  <text x="340" y="360" font-family="monospace" font-size="16" fill="#f0f6fc" text-anchor="end">{language}</text>
</svg>"##,
        accent = accent,
        name = escape_xml(&repo.full_name),
        tier = reputation.tier.label(),
        score = reputation.score,
        stars = repo.stars,
        forks = repo.forks,
        language = escape_xml(language),
    )
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
