pub mod add;
pub mod correct;
pub mod evaluate;
pub mod list;
pub mod normalize;
pub mod quiz;
pub mod sample;
pub mod search;
pub mod show;
pub mod stats;
pub mod submit;
pub mod teach;
