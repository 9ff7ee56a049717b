mod frame_timer;

pub use self::frame_timer::FrameTimer;
