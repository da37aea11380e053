fn main() {
    drone_anarchy::game::run();
}
