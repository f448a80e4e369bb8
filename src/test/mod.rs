mod coordinates;
mod dragonfly;
