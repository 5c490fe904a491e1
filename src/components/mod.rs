pub mod banner;
pub mod banner_frames;
pub mod shootout;
