//! Points d'entrée JNI de la classe Java `com.wavelevels.Waveform`.
//!
//! ```java
//! public final class Waveform {
//!     public static native float[] decodeToFloat(String input, String output);
//!     public static native void decodeToPcm(String input, String output);
//! }
//! ```
//!
//! Les erreurs sont journalisées une seule fois et ne traversent jamais la
//! frontière JNI : `decodeToFloat` renvoie `null`, `decodeToPcm` ne renvoie rien.

use jni::objects::{JClass, JString};
use jni::sys::{jfloatArray, jsize};
use jni::JNIEnv;

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("wavelevels"),
    );
}

fn read_paths(
    env: &mut JNIEnv,
    input: &JString,
    output: &JString,
) -> jni::errors::Result<(String, String)> {
    let input: String = env.get_string(input)?.into();
    let output: String = env.get_string(output)?.into();
    Ok((input, output))
}

fn to_float_array(env: &mut JNIEnv, values: &[i32]) -> jni::errors::Result<jfloatArray> {
    let floats: Vec<f32> = values
        .iter()
        .take(jsize::MAX as usize)
        .map(|&v| v as f32)
        .collect();
    let array = env.new_float_array(floats.len() as jsize)?;
    env.set_float_array_region(&array, 0, &floats)?;
    Ok(array.into_raw())
}

#[no_mangle]
pub extern "system" fn Java_com_wavelevels_Waveform_decodeToFloat<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    input: JString<'local>,
    output: JString<'local>,
) -> jfloatArray {
    init_logging();

    let (input, output) = match read_paths(&mut env, &input, &output) {
        Ok(paths) => paths,
        Err(e) => {
            log::error!("Chemins JNI illisibles : {}", e);
            return std::ptr::null_mut();
        }
    };

    // L'erreur est déjà journalisée par decode_to_waveform
    let Ok(values) = crate::decode_to_waveform(&input, &output) else {
        return std::ptr::null_mut();
    };

    match to_float_array(&mut env, &values) {
        Ok(array) => array,
        Err(e) => {
            log::error!("Impossible de créer le tableau float[] : {}", e);
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_com_wavelevels_Waveform_decodeToPcm<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    input: JString<'local>,
    output: JString<'local>,
) {
    init_logging();

    match read_paths(&mut env, &input, &output) {
        Ok((input, output)) => {
            // L'erreur est déjà journalisée par decode_to_pcm
            if crate::decode_to_pcm(&input, &output).is_err() {
                return;
            }
            log::debug!("decodeToPcm terminé : {}", output);
        }
        Err(e) => log::error!("Chemins JNI illisibles : {}", e),
    }
}
