// SPDX-License-Identifier: GPL-3.0-or-later

use automatcher_domain::CatalogArtist;
use serde::{Deserialize, Serialize};

/// Alternative names of one artist, in catalog order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistAliasSet(Vec<String>);

impl ArtistAliasSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Aliases of a looked-up artist plus a synthesized `"The <Name>"` form.
    ///
    /// The synthesized alias is only added when the name does not already
    /// start with "The " and the catalog does not list it. An unknown artist
    /// has no aliases.
    pub fn for_artist(artist: Option<&CatalogArtist>) -> Self {
        let Some(artist) = artist else {
            return Self::empty();
        };

        let mut set = Self::empty();
        for alias in &artist.aliases {
            set.insert(alias.clone());
        }

        if !artist.name.to_lowercase().starts_with("the ") {
            set.insert(format!("The {}", artist.name));
        }

        set
    }

    fn insert(&mut self, alias: String) {
        if !self.0.contains(&alias) {
            self.0.push(alias);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automatcher_domain::ArtistId;
    use uuid::Uuid;

    fn artist(name: &str, aliases: &[&str]) -> CatalogArtist {
        CatalogArtist::new(ArtistId(Uuid::nil()), name).with_aliases(aliases.iter().copied())
    }

    fn names(set: &ArtistAliasSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn synthesizes_the_prefix_for_artist_without_aliases() {
        let set = ArtistAliasSet::for_artist(Some(&artist("Brookes Brothers", &[])));
        assert_eq!(names(&set), vec!["The Brookes Brothers"]);
    }

    #[test]
    fn no_extra_the_when_name_already_has_it() {
        let set = ArtistAliasSet::for_artist(Some(&artist("The Automatic", &[])));
        assert!(set.is_empty());
        let set = ArtistAliasSet::for_artist(Some(&artist("THE AUTOMATIC", &[])));
        assert!(set.is_empty());
    }

    #[test]
    fn existing_the_alias_is_not_duplicated() {
        let set = ArtistAliasSet::for_artist(Some(&artist("Delays", &["The Delays"])));
        assert_eq!(names(&set), vec!["The Delays"]);
    }

    #[test]
    fn catalog_aliases_come_first_in_order() {
        let set = ArtistAliasSet::for_artist(Some(&artist(
            "Jay-Z",
            &["Jay Z", "Jayz", "Jay - Z", "Jaÿ-Z", "Jayz"],
        )));
        assert_eq!(
            names(&set),
            vec!["Jay Z", "Jayz", "Jay - Z", "Jaÿ-Z", "The Jay-Z"]
        );
    }

    #[test]
    fn unknown_artist_has_no_aliases() {
        assert!(ArtistAliasSet::for_artist(None).is_empty());
    }
}
