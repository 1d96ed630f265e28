pub mod artist;
pub mod features;
pub mod playlist;
pub mod track;
pub mod window;
