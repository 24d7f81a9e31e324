fn main() {
    arena_survivors::game::run();
}
