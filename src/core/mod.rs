pub mod gameloop;
