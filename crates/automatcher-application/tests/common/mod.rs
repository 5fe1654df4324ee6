// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process catalog that serves canned results and records every request.

#![allow(dead_code)]

use async_trait::async_trait;
use automatcher_application::query::track_search_query;
use automatcher_application::{
    ArtistId, ArtistMatcher, CachedQueryExecutor, CatalogArtist, CatalogError, CatalogService,
    CatalogTrack, MemoryStore, ResilientCatalog, RetryPolicy, Scored,
};
use automatcher_domain::TrackId;
use chrono::NaiveTime;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const KATE_NASH: &str = "49018fd2-95ef-4f7e-92bb-813159909314";
pub const JOSE_GONZALEZ: &str = "cd8c5019-5d75-4d5c-bc28-e1e26a7dd5c8";
pub const PINK: &str = "f4d5cc07-3bc9-4836-9b15-88a08359bc63";
pub const TCHAIKOVSKY: &str = "9ddd7abc-9e1b-471d-8031-583bc6bc8be9";
pub const JAY_Z_AND_LINKIN_PARK: &str = "ae681605-2801-4120-9a48-e18752042306";
pub const OASIS: &str = "39ab1aed-75e0-4140-bd47-540276886b60";
pub const OTHER_OASIS: &str = "5c8a1b3e-0f3a-4c5e-9d2b-7a1e6f4c3b21";
pub const THE_AUTOMATIC: &str = "afe5e238-d248-4da4-87b7-e70dfab787f6";
pub const AUTOMATIC: &str = "0e6b0c27-2f4e-4a43-8d55-3b7d9e2c1a10";
pub const LAST_SHADOW_PUPPETS: &str = "8a3e1c4f-59a8-457a-826c-fe961419a8ae";
pub const KOOKS: &str = "f82f3a3e-29c2-42ca-b589-bc5dc210fa9e";
pub const DELAYS: &str = "f86d80f3-3d2e-4450-9b0c-638152e93df3";
pub const BROOKES_BROTHERS: &str = "1ebfdf94-157b-47c0-a71e-9291c6a557cd";

pub fn id(mbid: &str) -> ArtistId {
    mbid.parse().expect("valid mbid")
}

pub fn artist(mbid: &str, name: &str) -> CatalogArtist {
    CatalogArtist::new(id(mbid), name)
}

pub fn track(score: u8, title: &str, artist: CatalogArtist) -> Scored<CatalogTrack> {
    Scored::new(
        score,
        CatalogTrack {
            id: TrackId(Uuid::new_v4()),
            title: title.to_string(),
            artist,
        },
    )
}

#[derive(Default)]
pub struct FakeCatalog {
    tracks: HashMap<String, Vec<Scored<CatalogTrack>>>,
    artists: HashMap<String, Vec<Scored<CatalogArtist>>>,
    details: HashMap<ArtistId, CatalogArtist>,
    failures_remaining: AtomicU32,
    lookup_failures_remaining: AtomicU32,
    track_queries: Mutex<Vec<String>>,
    artist_queries: Mutex<Vec<String>>,
    artist_lookups: Mutex<Vec<ArtistId>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results for the track query built from `artist` and `title`.
    pub fn with_tracks(mut self, artist: &str, title: &str, results: Vec<Scored<CatalogTrack>>) -> Self {
        self.tracks.insert(track_search_query(artist, title), results);
        self
    }

    pub fn with_artists(mut self, name: &str, results: Vec<(u8, CatalogArtist)>) -> Self {
        self.artists.insert(
            name.to_string(),
            results
                .into_iter()
                .map(|(score, artist)| Scored::new(score, artist))
                .collect(),
        );
        self
    }

    /// Full record returned by a lookup by id.
    pub fn with_details(mut self, artist: CatalogArtist) -> Self {
        self.details.insert(artist.id, artist);
        self
    }

    /// Fail the next `count` calls, whatever they are.
    pub fn failing(self, count: u32) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    /// Fail the next `count` lookups by id; searches keep working.
    pub fn failing_lookups(self, count: u32) -> Self {
        self.lookup_failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    pub fn track_queries(&self) -> Vec<String> {
        self.track_queries.lock().unwrap().clone()
    }

    pub fn artist_queries(&self) -> Vec<String> {
        self.artist_queries.lock().unwrap().clone()
    }

    pub fn artist_lookups(&self) -> Vec<ArtistId> {
        self.artist_lookups.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.track_queries().len() + self.artist_queries().len() + self.artist_lookups().len()
    }

    fn maybe_fail(&self) -> Result<(), CatalogError> {
        take_failure(&self.failures_remaining)
    }
}

fn take_failure(remaining: &AtomicU32) -> Result<(), CatalogError> {
    let left = remaining.load(Ordering::SeqCst);
    if left > 0 {
        remaining.store(left - 1, Ordering::SeqCst);
        return Err(CatalogError::Transport("connection refused".to_string()));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn search_tracks(
        &self,
        query: &str,
        _limit: u32,
    ) -> Result<Vec<Scored<CatalogTrack>>, CatalogError> {
        self.track_queries.lock().unwrap().push(query.to_string());
        self.maybe_fail()?;
        Ok(self.tracks.get(query).cloned().unwrap_or_default())
    }

    async fn search_artists(
        &self,
        name: &str,
        _limit: u32,
    ) -> Result<Vec<Scored<CatalogArtist>>, CatalogError> {
        self.artist_queries.lock().unwrap().push(name.to_string());
        self.maybe_fail()?;
        Ok(self.artists.get(name).cloned().unwrap_or_default())
    }

    async fn get_artist_by_id(&self, id: ArtistId) -> Result<Option<CatalogArtist>, CatalogError> {
        self.artist_lookups.lock().unwrap().push(id);
        self.maybe_fail()?;
        take_failure(&self.lookup_failures_remaining)?;
        Ok(self.details.get(&id).cloned())
    }
}

/// Matcher over a shared fake with an in-memory cache and the default retry policy.
pub fn matcher(catalog: FakeCatalog) -> (ArtistMatcher<Arc<FakeCatalog>>, Arc<FakeCatalog>) {
    let catalog = Arc::new(catalog);
    let matcher = ArtistMatcher::new(
        ResilientCatalog::new(catalog.clone(), RetryPolicy::default()),
        CachedQueryExecutor::new(
            Arc::new(MemoryStore::default()),
            NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
        ),
    );
    (matcher, catalog)
}

/// The catalog every scenario runs against.
pub fn music_catalog() -> FakeCatalog {
    let kate_nash = artist(KATE_NASH, "Kate Nash");
    let oasis = artist(OASIS, "Oasis");
    let other_oasis = artist(OTHER_OASIS, "Oasis");

    FakeCatalog::new()
        .with_tracks(
            "Kate Nash",
            "Pumpkin Soup",
            vec![
                track(100, "Pumpkin Soup", kate_nash.clone()),
                track(98, "Pumpkin Soup (live)", kate_nash.clone()),
            ],
        )
        .with_tracks(
            "non existent artist",
            "non existent track",
            vec![track(100, "Non Existent Track", kate_nash.clone())],
        )
        .with_artists(
            "non existent artist",
            vec![(100, artist("7d2ac8a1-5d1b-4b4c-9c8f-2c1e9d0b6a11", "Existence"))],
        )
        .with_tracks(
            "Oasis",
            "People",
            vec![
                track(100, "People", oasis.clone()),
                track(96, "People", other_oasis.clone()),
            ],
        )
        .with_tracks(
            "José González",
            "Down the Line",
            vec![track(100, "Down the Line", artist(JOSE_GONZALEZ, "José González"))],
        )
        .with_tracks(
            "Jose Gonzalez",
            "Down the Line",
            vec![track(100, "Down the Line", artist(JOSE_GONZALEZ, "José González"))],
        )
        .with_tracks(
            "P!nk",
            "Get the Party Started",
            vec![track(100, "Get the Party Started", artist(PINK, "P!nk"))],
        )
        .with_tracks(
            "Tchaikovsky",
            "Swan Lake",
            vec![track(
                100,
                "Swan Lake",
                artist(TCHAIKOVSKY, "Пётр Ильич Чайковский"),
            )],
        )
        .with_details(
            artist(TCHAIKOVSKY, "Пётр Ильич Чайковский")
                .with_aliases(["Tchaikovsky", "Pyotr Ilyich Tchaikovsky"]),
        )
        .with_tracks(
            "Jay-Z and Linkin Park",
            "Numb/Encore",
            vec![track(
                100,
                "Numb/Encore",
                artist(JAY_Z_AND_LINKIN_PARK, "Jay-Z & Linkin Park"),
            )],
        )
        .with_artists(
            "Kate Nash",
            vec![
                (100, kate_nash.clone()),
                (62, artist("3b8e0c4d-8f0a-4d8e-a0c4-5e7f9b1d2c33", "Kate Nash Tribute")),
            ],
        )
        .with_tracks(
            "Oasis",
            "Wonderwall",
            vec![
                track(100, "Wonderwall", oasis.clone()),
                track(95, "Wonderwall (remastered)", oasis.clone()),
                track(80, "Wonderwall", artist("9a4b2c1d-0e5f-4a6b-8c7d-1e2f3a4b5c6d", "Oasis Tribute Band")),
                track(40, "Wonderwall", other_oasis.clone()),
            ],
        )
        .with_artists("Oasis", vec![(100, oasis.clone()), (100, other_oasis.clone())])
        .with_artists(
            "The Automatic",
            vec![
                (100, artist(THE_AUTOMATIC, "The Automatic")),
                (90, artist(AUTOMATIC, "Automatic")),
            ],
        )
        .with_details(artist(AUTOMATIC, "Automatic").with_aliases(["The Automatic"]))
        .with_artists(
            "Last Shadow Puppets",
            vec![
                (100, artist(LAST_SHADOW_PUPPETS, "The Last Shadow Puppets")),
                (70, artist("2f1e0d9c-8b7a-4655-9443-3f2e1d0c9b8a", "Shadow Puppets")),
            ],
        )
        .with_tracks(
            "Kooks",
            "Sofa Song",
            vec![track(100, "Sofa Song", artist(KOOKS, "The Kooks"))],
        )
        .with_tracks(
            "Kooks",
            "Naive",
            vec![track(100, "Naïve", artist(KOOKS, "The Kooks"))],
        )
        .with_details(artist(KOOKS, "The Kooks").with_aliases(["Kooks"]))
        .with_tracks(
            "The Delays",
            "Nearer Than Heaven",
            vec![track(100, "Nearer Than Heaven", artist(DELAYS, "Delays"))],
        )
        .with_details(artist(DELAYS, "Delays").with_aliases(["The Delays"]))
        .with_artists(
            "The Brookes Brothers",
            vec![(100, artist(BROOKES_BROTHERS, "Brookes Brothers"))],
        )
        .with_details(artist(BROOKES_BROTHERS, "Brookes Brothers"))
}
