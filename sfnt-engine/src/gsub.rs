//! Single glyph substitution through `GSUB` features.
//!
//! Only lookups of type 1 (single substitution) are applied, either directly
//! or through extension lookups. The script is chosen from the candidates
//! of each code point, features are gathered from all language systems of
//! that script, and the lookups of every enabled feature are applied in the
//! order the features were enabled.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use sfnt_read::{
    tables::gsub::{self, Feature, Gsub, LangSys},
    ReadError,
};
use sfnt_types::{GlyphId, Tag};

use crate::{
    error::{FontError, ReadResultExt},
    script,
};

pub const VERT: Tag = Tag::new(b"vert");
pub const VRT2: Tag = Tag::new(b"vrt2");

/// Substitutes glyphs through the single substitution lookups of a `GSUB`
/// table.
///
/// Results are memoized per input glyph, along with the inverse mapping
/// used by [`unsubstitute`](Self::unsubstitute).
pub struct GlyphSubstitution<'a> {
    gsub: Gsub<'a>,
    scripts: Vec<Tag>,
    state: Mutex<SubstitutionState>,
}

#[derive(Debug, Default)]
struct SubstitutionState {
    last_used_script: Option<Tag>,
    lookup_cache: HashMap<GlyphId, GlyphId>,
    reverse_lookup: HashMap<GlyphId, GlyphId>,
}

impl<'a> GlyphSubstitution<'a> {
    pub fn new(gsub: Gsub<'a>) -> Result<Self, FontError> {
        let scripts = gsub
            .script_list()
            .in_table(gsub::TAG)?
            .script_records()
            .iter()
            .map(|record| record.tag)
            .collect();
        Ok(GlyphSubstitution {
            gsub,
            scripts,
            state: Default::default(),
        })
    }

    /// The script tags of the table, in table order.
    pub fn supported_script_tags(&self) -> &[Tag] {
        &self.scripts
    }

    /// Applies the `enabled_features`, for the best of `script_tags`.
    ///
    /// Substitution is memoized per glyph: the script and features of the
    /// first request for a glyph decide the result of every later one.
    pub fn substitute(&self, gid: GlyphId, script_tags: &[Tag], enabled_features: &[Tag]) -> GlyphId {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sgid) = state.lookup_cache.get(&gid) {
            return *sgid;
        }
        let script = self.select_script_tag(&mut state, script_tags);
        let sgid = match self.apply(gid, script, enabled_features) {
            Ok(sgid) => sgid,
            Err(e) => {
                log::warn!("glyph substitution for {gid} failed: {e}");
                gid
            }
        };
        state.lookup_cache.insert(gid, sgid);
        state.reverse_lookup.insert(sgid, gid);
        sgid
    }

    /// Returns the glyph that was substituted by `sgid`.
    ///
    /// Glyphs never produced by [`substitute`](Self::substitute) are returned
    /// unchanged.
    pub fn unsubstitute(&self, sgid: GlyphId) -> GlyphId {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state.reverse_lookup.get(&sgid) {
            Some(gid) => *gid,
            None => {
                log::warn!("trying to unsubstitute a never-before-seen glyph: {sgid}");
                sgid
            }
        }
    }

    fn select_script_tag(&self, state: &mut SubstitutionState, tags: &[Tag]) -> Option<Tag> {
        if let [tag] = tags {
            if *tag == script::INHERITED
                || (*tag == script::DEFAULT && !self.scripts.contains(tag))
            {
                // no context, so guess
                if state.last_used_script.is_none() {
                    state.last_used_script = self.scripts.first().copied();
                }
                return state.last_used_script;
            }
        }
        if let Some(tag) = tags.iter().find(|tag| self.scripts.contains(tag)) {
            state.last_used_script = Some(*tag);
            return Some(*tag);
        }
        tags.first().copied()
    }

    fn apply(&self, gid: GlyphId, script: Option<Tag>, enabled: &[Tag]) -> Result<GlyphId, FontError> {
        let Some(script) = script else {
            return Ok(gid);
        };
        let lang_systems = self.lang_sys_tables(script).in_table(gsub::TAG)?;
        let features = self
            .feature_records(&lang_systems, enabled)
            .in_table(gsub::TAG)?;
        let mut sgid = gid;
        for (_, feature) in &features {
            sgid = self.apply_feature(feature, sgid).in_table(gsub::TAG)?;
        }
        Ok(sgid)
    }

    /// All language systems of the script, the default last.
    fn lang_sys_tables(&self, script: Tag) -> Result<Vec<LangSys<'a>>, ReadError> {
        let Some(script) = self.gsub.script_list()?.find(script).transpose()? else {
            return Ok(Vec::new());
        };
        let mut result = script
            .lang_sys_records()
            .iter()
            .map(|record| script.lang_sys(&record))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(default) = script.default_lang_sys() {
            result.push(default?);
        }
        Ok(result)
    }

    /// The required and enabled features of the language systems, ordered
    /// by their position in `enabled`.
    ///
    /// Required features that were not enabled go first. `vrt2` replaces
    /// `vert` when both are present.
    fn feature_records(
        &self,
        lang_systems: &[LangSys<'a>],
        enabled: &[Tag],
    ) -> Result<Vec<(Tag, Feature<'a>)>, ReadError> {
        let feature_list = self.gsub.feature_list()?;
        let mut result = Vec::new();
        for lang_sys in lang_systems {
            if let Some(required) = lang_sys.required_feature_index() {
                result.push(feature_list.get(required)?);
            }
            for index in lang_sys.feature_indices().iter() {
                let (tag, feature) = feature_list.get(index)?;
                if enabled.contains(&tag) {
                    result.push((tag, feature));
                }
            }
        }
        if result.iter().any(|(tag, _)| *tag == VRT2) {
            result.retain(|(tag, _)| *tag != VERT);
        }
        let rank = |tag: &Tag| enabled.iter().position(|t| t == tag);
        // stable, and None sorts before Some
        result.sort_by_key(|(tag, _)| rank(tag));
        Ok(result)
    }

    fn apply_feature(&self, feature: &Feature<'a>, gid: GlyphId) -> Result<GlyphId, ReadError> {
        let mut sgid = gid;
        for lookup_index in feature.lookup_list_indices().iter() {
            let lookup = self.gsub.lookup_list()?.get(lookup_index)?;
            let is_single = match lookup.lookup_type() {
                gsub::SINGLE_SUBSTITUTION | gsub::EXTENSION_SUBSTITUTION => true,
                other => {
                    log::debug!("skipping GSUB lookup {lookup_index} of type {other}");
                    false
                }
            };
            if !is_single {
                continue;
            }
            if let Some(result) = self
                .gsub
                .single_substitutions(lookup_index)?
                .iter()
                .find_map(|subtable| subtable.substitute(sgid))
            {
                sgid = result;
            }
        }
        Ok(sgid)
    }
}

impl std::fmt::Debug for GlyphSubstitution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphSubstitution")
            .field("scripts", &self.scripts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sfnt_read::{FontData, FontRead};
    use sfnt_test_data::gsub as test_data;

    use super::*;

    const LATN: Tag = Tag::new(b"latn");

    fn substitution(data: &[u8]) -> GlyphSubstitution<'_> {
        GlyphSubstitution::new(Gsub::read(FontData::new(data)).unwrap()).unwrap()
    }

    #[rstest]
    #[case::vert_only(&[VERT], 1, 11)]
    #[case::vert_second_glyph(&[VERT], 2, 12)]
    #[case::vrt2_replaces_vert(&[VRT2, VERT], 1, 20)]
    #[case::vrt2_without_coverage(&[VRT2, VERT], 2, 2)]
    #[case::nothing_enabled(&[], 1, 1)]
    #[case::unknown_feature(&[Tag::new(b"smcp")], 1, 1)]
    fn substitutes(#[case] features: &[Tag], #[case] gid: u16, #[case] expected: u16) {
        let data = test_data::vertical_gsub();
        let gsub = substitution(&data);
        assert_eq!(
            gsub.substitute(GlyphId::new(gid), &[LATN], features),
            GlyphId::new(expected)
        );
    }

    #[test]
    fn unsubstitute_inverts() {
        let data = test_data::vertical_gsub();
        let gsub = substitution(&data);
        let sgid = gsub.substitute(GlyphId::new(1), &[LATN], &[VERT]);
        assert_eq!(sgid, GlyphId::new(11));
        assert_eq!(gsub.unsubstitute(sgid), GlyphId::new(1));
        // never seen
        assert_eq!(gsub.unsubstitute(GlyphId::new(7)), GlyphId::new(7));
    }

    #[test]
    fn results_are_memoized_per_glyph() {
        let data = test_data::vertical_gsub();
        let gsub = substitution(&data);
        assert_eq!(
            gsub.substitute(GlyphId::new(1), &[LATN], &[VERT]),
            GlyphId::new(11)
        );
        // the cached result wins over the new feature set
        assert_eq!(
            gsub.substitute(GlyphId::new(1), &[LATN], &[VRT2]),
            GlyphId::new(11)
        );
    }

    #[test]
    fn script_selection() {
        let data = test_data::vertical_gsub();
        let gsub = substitution(&data);
        assert_eq!(gsub.supported_script_tags(), &[LATN]);
        let mut state = SubstitutionState::default();
        // unknown script: the first candidate, not remembered
        assert_eq!(
            gsub.select_script_tag(&mut state, &[Tag::new(b"cyrl")]),
            Some(Tag::new(b"cyrl"))
        );
        assert_eq!(state.last_used_script, None);
        // inherited falls back to the first script of the font
        assert_eq!(
            gsub.select_script_tag(&mut state, &[script::INHERITED]),
            Some(LATN)
        );
        // a supported candidate later in the list is found
        assert_eq!(
            gsub.select_script_tag(&mut state, &[Tag::new(b"dev2"), LATN]),
            Some(LATN)
        );
        assert_eq!(
            gsub.select_script_tag(&mut state, &[script::DEFAULT]),
            Some(LATN)
        );
    }

    #[test]
    fn unsupported_script_substitutes_nothing() {
        let data = test_data::vertical_gsub();
        let gsub = substitution(&data);
        assert_eq!(
            gsub.substitute(GlyphId::new(1), &[Tag::new(b"arab")], &[VERT]),
            GlyphId::new(1)
        );
    }
}
