//! Cover image selection for newly created interviews.

use rand::seq::SliceRandom;

/// Fixed set of cover images served by the frontend.
pub const INTERVIEW_COVERS: &[&str] = &[
    "/covers/adobe.png",
    "/covers/amazon.png",
    "/covers/facebook.png",
    "/covers/hostinger.png",
    "/covers/pinterest.png",
    "/covers/quora.png",
    "/covers/reddit.png",
    "/covers/skype.png",
    "/covers/spotify.png",
    "/covers/telegram.png",
    "/covers/tiktok.png",
    "/covers/yahoo.png",
];

pub fn random_cover() -> &'static str {
    INTERVIEW_COVERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(INTERVIEW_COVERS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_always_comes_from_the_fixed_set() {
        for _ in 0..100 {
            assert!(INTERVIEW_COVERS.contains(&random_cover()));
        }
    }
}
