use crate::image_classifier::interface::ClassifyError;
use image::{imageops, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

/// Scales to fit inside `width` x `height`, padding the remainder with black.
pub fn resize_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    if new_w == width && new_h == height {
        return image.resize_exact(width, height, imageops::FilterType::Triangle);
    }

    let scaled = image
        .resize_exact(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut padded = RgbImage::new(width, height);
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::overlay(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    DynamicImage::from(padded)
}

fn image_to_tensor(
    image: &DynamicImage,
    mean: [f32; 3],
    std: [f32; 3],
) -> Result<Tensor, ClassifyError> {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let mut tensor = Tensor::zero::<f32>(&[1, 3, height, width])
        .map_err(|e| ClassifyError::ImageConversion(e.to_string()))?;
    let slice = tensor
        .as_slice_mut::<f32>()
        .map_err(|e| ClassifyError::ImageConversion(e.to_string()))?;

    let plane = height * width;
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let offset = y as usize * width + x as usize;
        for c in 0..3 {
            slice[c * plane + offset] = (pixel[c] as f32 / 255.0 - mean[c]) / std[c];
        }
    }

    Ok(tensor)
}

/// NCHW tensor of shape `[1, 3, height, width]`.
pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    mean: [f32; 3],
    std: [f32; 3],
) -> Result<Tensor, ClassifyError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ClassifyError::ImageConversion(
            "image has no pixels".to_string(),
        ));
    }

    let resized = resize_image(image, width, height);
    image_to_tensor(&resized, mean, std)
}
