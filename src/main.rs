#[macro_use]
extern crate rocket;

#[launch]
fn rocket() -> _ {
    formdata_server::rocket()
}
