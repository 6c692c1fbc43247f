//! Integration tests for the nested navigation-frame engine

mod frame_stack;
mod nested_frames;
mod suspend_resume;
