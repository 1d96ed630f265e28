use crate::{
    domain::playlist::UserProfile,
    engine::normalize,
    upstream::{AUDIO_FEATURES_BATCH, MusicApi, UpstreamError, raw::RawAudioFeatures},
};

/// Handle to an account that answered a profile request.
///
/// Every view takes the session explicitly; there is no ambient client.
pub struct Session<A> {
    api: A,
    profile: UserProfile,
}

impl<A: MusicApi> Session<A> {
    /// when called, checks that the api accepts our credentials
    pub fn connect(api: A) -> Result<Self, UpstreamError> {
        let profile = normalize::profile(api.fetch_profile()?);
        log::info!("connected as {} ({})", profile.display_name, profile.id);
        Ok(Self { api, profile })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Looks up features for any number of ids, in upstream-sized batches.
    ///
    /// Ids upstream has no features for are left out.
    pub fn audio_features(&self, ids: &[String]) -> Result<Vec<RawAudioFeatures>, UpstreamError> {
        let mut features = Vec::with_capacity(ids.len());
        for batch in ids.chunks(AUDIO_FEATURES_BATCH) {
            features.extend(self.api.fetch_audio_features(batch)?.into_iter().flatten());
        }
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::{FakeApi, raw_features};

    #[test]
    fn connect_loads_profile() -> anyhow::Result<()> {
        let session = Session::connect(FakeApi::default())?;

        assert_eq!(session.profile().id, "user1");
        assert_eq!(session.profile().display_name, "Test User");

        Ok(())
    }

    #[test]
    fn connect_fails_when_unauthorized() {
        let api = FakeApi {
            profile: Err(UpstreamError::Unauthorized("bad token".into())),
            ..Default::default()
        };

        let err = Session::connect(api).err().unwrap();

        assert_eq!(err, UpstreamError::Unauthorized("bad token".into()));
    }

    #[test]
    fn feature_lookups_are_chunked() -> anyhow::Result<()> {
        let ids: Vec<String> = (0..250).map(|i| format!("t{i}")).collect();
        let api = FakeApi {
            audio_features: Ok(ids
                .iter()
                .take(120)
                .map(|id| (id.clone(), raw_features(id, 0.5)))
                .collect()),
            ..Default::default()
        };
        let session = Session::connect(api)?;

        let features = session.audio_features(&ids)?;

        assert_eq!(session.api().feature_batches(), vec![100, 100, 50]);
        assert_eq!(features.len(), 120);

        Ok(())
    }

    #[test]
    fn feature_lookup_error_stops_the_batch_loop() {
        let api = FakeApi {
            audio_features: Err(UpstreamError::Forbidden("deprecated".into())),
            ..Default::default()
        };
        let session = Session::connect(api).unwrap();
        let ids: Vec<String> = (0..150).map(|i| format!("t{i}")).collect();

        let err = session.audio_features(&ids).unwrap_err();

        assert!(err.is_capability_unavailable());
        assert_eq!(session.api().feature_batches(), vec![100]);
    }
}
