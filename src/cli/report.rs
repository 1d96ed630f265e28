//! Plain text rendering of the views for the terminal

use std::io::{self, Write};

use crate::{
    domain::features::{Dimension, FeatureAvailability},
    engine::{
        features::{MoodPoint, MoodQuadrant, RadarProfile},
        temporal::{ActivityHeatmap, DAYS},
    },
    views::{
        audio::AudioFeaturesView,
        charts::TopChartsView,
        patterns::{LibrarySection, ListeningPatternsView},
        playlists::{PlaylistAnalysisView, PlaylistsView},
        profile::ProfileView,
    },
};

/// rows shown per list in text reports
const SHOWN: usize = 10;

pub fn profile(out: &mut dyn Write, view: &ProfileView) -> io::Result<()> {
    let p = &view.profile;
    writeln!(out, "{} ({})", p.display_name, p.id)?;
    writeln!(out, "  followers: {}", p.followers)?;
    writeln!(out, "  country:   {}", p.country.as_deref().unwrap_or("-"))?;
    writeln!(out, "  plan:      {}", p.plan.as_deref().unwrap_or("-"))?;
    if let Some(url) = &p.external_url {
        writeln!(out, "  {url}")?;
    }
    Ok(())
}

pub fn top_charts(out: &mut dyn Write, view: &TopChartsView) -> io::Result<()> {
    writeln!(out, "Top charts, {}", view.label)?;

    writeln!(out, "\nArtists:")?;
    for artist in view.artists.iter().take(SHOWN) {
        writeln!(
            out,
            "  {:>2}. {} [{}] popularity {}",
            artist.rank,
            artist.name,
            artist.primary_genre(),
            artist.popularity
        )?;
    }

    writeln!(out, "\nTracks:")?;
    for track in view.tracks.iter().take(SHOWN) {
        writeln!(
            out,
            "  {:>2}. {} - {} ({:.2} min)",
            track.rank.unwrap_or_default(),
            track.name,
            track.artist_credit(),
            track.duration_minutes()
        )?;
    }

    writeln!(out, "\nGenres:")?;
    for genre in &view.genres {
        writeln!(out, "  {:<24} {}", genre.genre, genre.count)?;
    }
    Ok(())
}

pub fn audio_features(out: &mut dyn Write, view: &AudioFeaturesView) -> io::Result<()> {
    writeln!(
        out,
        "Audio features of {} top tracks, {}",
        view.tracks, view.label
    )?;
    if !write_availability(out, view.availability)? {
        return Ok(());
    }

    write_profile(out, &view.profile)?;

    if let Some(tempo) = &view.tempo {
        writeln!(out, "\nAverage tempo: {:.0} BPM", tempo.mean)?;
    }
    if let Some(loudness) = &view.loudness {
        writeln!(out, "Average loudness: {:.1} dB", loudness.mean)?;
    }

    write_quadrants(out, &view.mood_points)?;

    writeln!(out)?;
    for dimension in Dimension::ALL {
        writeln!(
            out,
            "  {:<18} {}",
            dimension.name(),
            dimension.description()
        )?;
    }
    Ok(())
}

pub fn listening_patterns(out: &mut dyn Write, view: &ListeningPatternsView) -> io::Result<()> {
    let s = &view.summary;
    writeln!(out, "Tracks in history: {}", s.plays)?;
    writeln!(out, "Unique artists:    {}", s.unique_artists)?;
    writeln!(out, "Unique tracks:     {}", s.unique_tracks)?;
    writeln!(out, "Minutes listened:  {}", s.minutes_listened)?;
    if view.skipped > 0 {
        writeln!(out, "({} records skipped)", view.skipped)?;
    }

    if let (Some(hour), Some(day)) = (view.peak_hour, view.peak_day_name) {
        writeln!(
            out,
            "\nPeak listening time is around {hour:02}:00, most on {day}s."
        )?;
    }

    if view.heatmap.total() > 0 {
        write_heatmap(out, &view.heatmap)?;
    }

    writeln!(out, "\nRecently played:")?;
    for track in &view.recent {
        let when = track
            .timestamp
            .map(|t| t.format("%b %d, %H:%M").to_string())
            .unwrap_or_default();
        writeln!(out, "  {when}  {} - {}", track.name, track.artist_credit())?;
    }

    writeln!(out, "\nLibrary:")?;
    match &view.library {
        LibrarySection::Loaded {
            daily, discovery, ..
        } => {
            for day in daily {
                writeln!(out, "  {}  +{}", day.date, day.count)?;
            }
            if let Some(d) = discovery {
                writeln!(
                    out,
                    "  {} new artists discovered recently, {}% of recent listening",
                    d.new_count, d.discovery_pct
                )?;
            }
        }
        LibrarySection::Failed { reason } => {
            writeln!(out, "  could not load saved tracks: {reason}")?;
        }
    }
    Ok(())
}

pub fn playlists(out: &mut dyn Write, view: &PlaylistsView) -> io::Result<()> {
    if view.playlists.is_empty() {
        writeln!(out, "No playlists found.")?;
    }
    for p in &view.playlists {
        writeln!(
            out,
            "{:<24} {} ({} tracks, by {})",
            p.id, p.name, p.total_tracks, p.owner
        )?;
    }
    Ok(())
}

pub fn playlist_analysis(out: &mut dyn Write, view: &PlaylistAnalysisView) -> io::Result<()> {
    let name = view.playlist.as_ref().map_or(view.id.as_str(), |p| p.name.as_str());
    let s = &view.summary;
    writeln!(out, "{name}")?;
    writeln!(out, "  tracks analysed: {}", s.tracks)?;
    writeln!(out, "  unique artists:  {}", s.unique_artists)?;
    writeln!(out, "  total duration:  {}h {}m", s.hours, s.minutes)?;
    if let Some(popularity) = s.average_popularity {
        writeln!(out, "  avg popularity:  {popularity:.0}")?;
    }
    if let Some(diversity) = view.diversity {
        writeln!(out, "  diversity score: {diversity}")?;
    }

    if write_availability(out, view.availability)? {
        write_profile(out, &view.profile)?;
        write_quadrants(out, &view.mood_points)?;
    }

    writeln!(out, "\nTracks:")?;
    for track in &view.tracks {
        writeln!(
            out,
            "  {} - {} ({}) popularity {}",
            track.name,
            track.artist_credit(),
            track.album,
            track.popularity
        )?;
    }
    Ok(())
}

/// false when there is nothing feature-based to show
fn write_availability(
    out: &mut dyn Write,
    availability: FeatureAvailability,
) -> io::Result<bool> {
    let note = match availability {
        FeatureAvailability::Available => return Ok(true),
        FeatureAvailability::CapabilityUnavailable => {
            "Audio features unavailable: upstream refused the lookup."
        }
        FeatureAvailability::InsufficientData => "No audio features found for these tracks.",
    };
    writeln!(out, "\n{note}")?;
    Ok(false)
}

fn write_profile(out: &mut dyn Write, profile: &RadarProfile) -> io::Result<()> {
    writeln!(out, "\nSonic profile ({} tracks):", profile.samples)?;
    for value in &profile.values {
        let bar = "#".repeat((value.mean.clamp(0.0, 1.0) * 20.0).round() as usize);
        writeln!(
            out,
            "  {:<18} {:.2} {bar}",
            value.dimension.name(),
            value.mean
        )?;
    }
    Ok(())
}

fn write_quadrants(out: &mut dyn Write, points: &[MoodPoint]) -> io::Result<()> {
    if points.is_empty() {
        return Ok(());
    }
    writeln!(out, "\nMood:")?;
    for quadrant in [
        MoodQuadrant::HappyEnergetic,
        MoodQuadrant::AngryIntense,
        MoodQuadrant::SadCalm,
        MoodQuadrant::PeacefulContent,
    ] {
        let count = points.iter().filter(|p| p.quadrant == quadrant).count();
        writeln!(out, "  {:<20} {count}", quadrant.label())?;
    }
    Ok(())
}

/// one row per weekday, one column per hour; heavier marks mean more plays
fn write_heatmap(out: &mut dyn Write, heatmap: &ActivityHeatmap) -> io::Result<()> {
    let busiest = heatmap.cells.iter().flatten().copied().max().unwrap_or(0);
    writeln!(out, "\n      0     6     12    18   23")?;
    for (day, name) in DAYS.iter().enumerate() {
        let row: String = (0..24)
            .map(|hour| match heatmap.get(day as u32, hour) {
                0 => '.',
                n if n * 2 > busiest => '#',
                _ => '+',
            })
            .collect();
        writeln!(out, "  {}  {row}", &name[..3])?;
    }
    Ok(())
}
